//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, classes, copies, dashboard, health, librarians, loans, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LibraryFMD API",
        version = "1.0.0",
        description = "School library management REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Students
        students::list_students,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
        students::import_students,
        students::list_imported,
        // Classes
        classes::list_classes,
        classes::create_class,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Copies
        copies::list_copies,
        copies::get_copy,
        copies::list_book_copies,
        copies::create_copy,
        copies::update_copy,
        copies::delete_copy,
        // Librarians
        librarians::list_librarians,
        librarians::get_librarian,
        librarians::create_librarian,
        librarians::update_librarian,
        librarians::delete_librarian,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::create_loan,
        loans::update_loan,
        loans::delete_loan,
        // Dashboard
        dashboard::get_summary,
        dashboard::get_top_books,
        dashboard::get_overdue_loans,
        dashboard::get_loans_per_month,
        dashboard::get_copy_availability,
    ),
    components(
        schemas(
            // Students
            crate::models::student::Student,
            crate::models::student::CreateStudent,
            crate::models::student::UpdateStudent,
            crate::models::import_report::ImportRecord,
            crate::models::import_report::ImportSummary,
            students::ImportUpload,
            // Classes
            crate::models::class::SchoolClass,
            crate::models::class::CreateClass,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Copies
            crate::models::copy::BookCopy,
            crate::models::copy::CopyDetails,
            crate::models::copy::CreateCopy,
            crate::models::copy::UpdateCopy,
            // Librarians
            crate::models::librarian::Librarian,
            crate::models::librarian::LibrarianInput,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanSummary,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoan,
            crate::models::loan::UpdateLoan,
            // Dashboard
            crate::models::dashboard::DashboardSummary,
            crate::models::dashboard::TopBook,
            crate::models::dashboard::OverdueLoan,
            crate::models::dashboard::MonthlyLoans,
            crate::models::dashboard::LoansPerMonth,
            crate::models::dashboard::CopyAvailability,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "students", description = "Students and spreadsheet import"),
        (name = "classes", description = "School classes"),
        (name = "books", description = "Book catalog"),
        (name = "copies", description = "Physical copies of books"),
        (name = "librarians", description = "Librarian accounts"),
        (name = "loans", description = "Loan management"),
        (name = "dashboard", description = "Dashboard aggregates")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_endpoint_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/students/import"));
        assert!(doc.paths.paths.contains_key("/dashboard/top-books"));
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("ImportUpload"));
    }
}
