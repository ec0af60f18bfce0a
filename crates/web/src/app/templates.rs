//! Embedded minijinja templates and render helpers.

use axum::http::{header, HeaderMap};
use axum::response::Response;
use minijinja::{context, Environment, Value};

use crate::app::flash;
use crate::app::services::AppServices;

static BASE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{% block title %}Bookshelf{% endblock %}</title>
</head>
<body>
  <nav>
    <a href="/">Home</a> |
    <a href="/authors">Authors</a> |
    <a href="/authors/new">Add author</a>
  </nav>
  {% if flash %}<p class="flash flash-{{ flash.kind }}">{{ flash.text }}</p>{% endif %}
  {% block content %}{% endblock %}
</body>
</html>
"#;

static HOME: &str = r#"{% extends "base.html" %}
{% block content %}
<h1>Bookshelf</h1>
<p>A small catalogue of authors and their books.</p>
<p><a href="/authors">Browse the authors</a></p>
{% endblock %}
"#;

static AUTHOR_LIST: &str = r#"{% extends "base.html" %}
{% block title %}Authors - Bookshelf{% endblock %}
{% block content %}
<h1>Authors</h1>
{% if authors %}
<table>
  <tr><th>Username</th><th>Email</th><th>Books</th><th></th></tr>
  {% for author in authors %}
  <tr>
    <td><a href="/authors/{{ author.id }}">{{ author.username }}</a></td>
    <td>{{ author.email }}</td>
    <td>{{ author.nb_books }}</td>
    <td>
      <a href="/authors/{{ author.id }}/edit">Edit</a>
      <form method="post" action="/authors/{{ author.id }}/delete">
        <button type="submit">Delete</button>
      </form>
    </td>
  </tr>
  {% endfor %}
</table>
{% else %}
<p>No authors yet.</p>
{% endif %}
<form method="post" action="/authors/quick-add">
  <button type="submit">Add seed author</button>
</form>
{% endblock %}
"#;

static AUTHOR_DETAIL: &str = r#"{% extends "base.html" %}
{% block title %}{{ author.username }} - Bookshelf{% endblock %}
{% block content %}
<h1>{{ author.username }}</h1>
<dl>
  <dt>Email</dt><dd>{{ author.email }}</dd>
  <dt>Declared books</dt><dd>{{ author.nb_books }}</dd>
</dl>
{% if author.book_titles %}
<h2>Books</h2>
<ul>
  {% for title in author.book_titles %}<li>{{ title }}</li>{% endfor %}
</ul>
{% endif %}
<p>
  <a href="/authors/{{ author.id }}/edit">Edit</a> |
  <a href="/authors">Back to the list</a>
</p>
{% endblock %}
"#;

static AUTHOR_FORM: &str = r#"{% extends "base.html" %}
{% block title %}{{ title }} - Bookshelf{% endblock %}
{% block content %}
<h1>{{ title }}</h1>
{% if form.error %}<p class="error">{{ form.error }}</p>{% endif %}
<form method="post" action="{{ action }}">
  <label>Email <input type="text" name="email" value="{{ form.email }}"></label>
  <label>Username <input type="text" name="username" value="{{ form.username }}"></label>
  <label>Books <input type="number" name="nb_books" value="{{ form.nb_books }}"></label>
  <button type="submit">Save</button>
</form>
{% endblock %}
"#;

static ERROR_PAGE: &str = r#"{% extends "base.html" %}
{% block title %}Error - Bookshelf{% endblock %}
{% block content %}
<h1>Something went wrong</h1>
<p>The request could not be completed. Please try again.</p>
{% endblock %}
"#;

/// Build the template environment with all pages registered.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("base.html", BASE)?;
    env.add_template("home.html", HOME)?;
    env.add_template("authors/list.html", AUTHOR_LIST)?;
    env.add_template("authors/detail.html", AUTHOR_DETAIL)?;
    env.add_template("authors/form.html", AUTHOR_FORM)?;
    env.add_template("error.html", ERROR_PAGE)?;
    Ok(env)
}

/// Render a page, folding in (and consuming) any pending flash message.
pub fn page(services: &AppServices, headers: &HeaderMap, name: &str, ctx: Value) -> Response {
    let pending = flash::peek(headers);
    let consumed = pending.is_some();
    let mut response = services.render(name, context! { flash => pending, ..ctx });
    if consumed {
        response
            .headers_mut()
            .append(header::SET_COOKIE, flash::clear_cookie());
    }
    response
}
