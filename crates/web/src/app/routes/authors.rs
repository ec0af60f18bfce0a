use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use minijinja::context;

use bookshelf_core::AuthorId;
use bookshelf_infra::{AuthorRepository, MutationOutcome};

use crate::app::flash::{self, Flash};
use crate::app::services::AppServices;
use crate::app::templates;
use crate::app::views::{AuthorForm, AuthorView, FormView};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_authors))
        .route("/new", get(new_author_form).post(create_author))
        .route("/quick-add", post(quick_add_author))
        .route("/:id", get(author_details))
        .route("/:id/edit", get(edit_author_form).post(update_author))
        .route("/:id/delete", post(delete_author))
}

pub async fn list_authors(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> Response {
    let authors = match services.repo.find_all() {
        Ok(authors) => authors,
        Err(err) => {
            tracing::error!(error = %err, "listing authors failed");
            return internal_error(&services);
        }
    };
    let authors: Vec<AuthorView> = authors.iter().map(AuthorView::from_author).collect();
    templates::page(&services, &headers, "authors/list.html", context! { authors })
}

pub async fn author_details(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<AuthorId>() else {
        return back_to_listing(Flash::error("Invalid author id"));
    };
    match services.repo.find_by_id(id) {
        Ok(Some(author)) => templates::page(
            &services,
            &headers,
            "authors/detail.html",
            context! { author => AuthorView::from_author(&author) },
        ),
        Ok(None) => back_to_listing(Flash::error("Author not found")),
        Err(err) => {
            tracing::error!(author_id = %id, error = %err, "loading author failed");
            internal_error(&services)
        }
    }
}

pub async fn new_author_form(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> Response {
    match services.pipeline.create(None) {
        MutationOutcome::AwaitingInput(author) => render_form(
            &services,
            &headers,
            "/authors/new",
            "Add author",
            FormView::from_author(&author, None),
        ),
        outcome => unexpected(&services, "create", outcome),
    }
}

pub async fn create_author(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Form(form): Form<AuthorForm>,
) -> Response {
    let submission = match form.to_submission() {
        Ok(submission) => submission,
        Err(reason) => {
            return render_form(
                &services,
                &headers,
                "/authors/new",
                "Add author",
                FormView::from_form(&form, Some(reason)),
            )
        }
    };
    match services.pipeline.create(Some(&submission)) {
        MutationOutcome::Created(id) => {
            tracing::info!(author_id = %id, "author created");
            back_to_listing(Flash::success("Author added successfully"))
        }
        MutationOutcome::NeedsCorrection { reason, author } => render_form(
            &services,
            &headers,
            "/authors/new",
            "Add author",
            FormView::from_author(&author, Some(reason)),
        ),
        MutationOutcome::Failed(msg) => failed(&services, "create", &msg),
        outcome => unexpected(&services, "create", outcome),
    }
}

pub async fn quick_add_author(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.pipeline.quick_add() {
        MutationOutcome::Created(id) => {
            tracing::info!(author_id = %id, "seed author created");
            back_to_listing(Flash::success("Author added successfully"))
        }
        MutationOutcome::Failed(msg) => failed(&services, "quick-add", &msg),
        outcome => unexpected(&services, "quick-add", outcome),
    }
}

pub async fn edit_author_form(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<AuthorId>() else {
        return back_to_listing(Flash::error("Invalid author id"));
    };
    match services.pipeline.update(id, None) {
        MutationOutcome::AwaitingInput(author) => render_form(
            &services,
            &headers,
            &format!("/authors/{id}/edit"),
            "Edit author",
            FormView::from_author(&author, None),
        ),
        MutationOutcome::NotFound => back_to_listing(Flash::error("Author not found")),
        MutationOutcome::Failed(msg) => failed(&services, "edit", &msg),
        outcome => unexpected(&services, "edit", outcome),
    }
}

pub async fn update_author(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> Response {
    let Ok(id) = id.parse::<AuthorId>() else {
        return back_to_listing(Flash::error("Invalid author id"));
    };
    let submission = match form.to_submission() {
        Ok(submission) => submission,
        Err(reason) => {
            return render_form(
                &services,
                &headers,
                &format!("/authors/{id}/edit"),
                "Edit author",
                FormView::from_form(&form, Some(reason)),
            )
        }
    };
    match services.pipeline.update(id, Some(&submission)) {
        MutationOutcome::Updated(id) => {
            tracing::info!(author_id = %id, "author updated");
            redirect_with_flash(
                &format!("/authors/{id}"),
                Flash::success("Author updated successfully"),
            )
        }
        MutationOutcome::NeedsCorrection { reason, author } => render_form(
            &services,
            &headers,
            &format!("/authors/{id}/edit"),
            "Edit author",
            FormView::from_author(&author, Some(reason)),
        ),
        MutationOutcome::NotFound => back_to_listing(Flash::error("Author not found")),
        MutationOutcome::Failed(msg) => failed(&services, "update", &msg),
        outcome => unexpected(&services, "update", outcome),
    }
}

pub async fn delete_author(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<AuthorId>() else {
        return back_to_listing(Flash::error("Invalid author id"));
    };
    match services.pipeline.delete(id) {
        MutationOutcome::Deleted(id) => {
            tracing::info!(author_id = %id, "author deleted");
            back_to_listing(Flash::success("Author deleted successfully"))
        }
        MutationOutcome::NotFound => back_to_listing(Flash::error("Author not found")),
        MutationOutcome::Failed(msg) => failed(&services, "delete", &msg),
        outcome => unexpected(&services, "delete", outcome),
    }
}

fn render_form(
    services: &AppServices,
    headers: &HeaderMap,
    action: &str,
    title: &str,
    form: FormView,
) -> Response {
    templates::page(
        services,
        headers,
        "authors/form.html",
        context! { action, title, form },
    )
}

fn redirect_with_flash(to: &str, flash: Flash) -> Response {
    let mut response = Redirect::to(to).into_response();
    response
        .headers_mut()
        .append(header::SET_COOKIE, flash::set_cookie(&flash));
    response
}

fn back_to_listing(flash: Flash) -> Response {
    redirect_with_flash("/authors", flash)
}

fn internal_error(services: &AppServices) -> Response {
    let mut response = services.render("error.html", context! {});
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn failed(services: &AppServices, flow: &str, diagnostic: &str) -> Response {
    tracing::error!(flow, diagnostic, "mutation failed");
    internal_error(services)
}

/// Outcomes the route cannot map are a server bug, not a user error.
fn unexpected(services: &AppServices, flow: &str, outcome: MutationOutcome) -> Response {
    tracing::error!(flow, ?outcome, "unexpected mutation outcome");
    internal_error(services)
}
