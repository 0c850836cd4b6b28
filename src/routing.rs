//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    analytics::{get_analytics_page, get_analytics_report},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    transaction::{
        add_sample_transactions_endpoint, create_transaction_endpoint,
        delete_transaction_endpoint, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let views = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::ANALYTICS_VIEW, get(get_analytics_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::SAMPLE_TRANSACTIONS_API,
            post(add_sample_transactions_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::ANALYTICS_API, get(get_analytics_report));

    views
        .merge(api)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::OffsetDateTime;

    use crate::{AppState, endpoints, endpoints::format_endpoint};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state.");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn count(html: &Html, selector: &str) -> usize {
        html.select(&Selector::parse(selector).unwrap()).count()
    }

    async fn get_report(server: &TestServer) -> serde_json::Value {
        server.get(endpoints::ANALYTICS_API).await.json()
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_server_error() {
        let server = get_test_server();

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn empty_store_shows_prompts() {
        let server = get_test_server();

        let transactions = Html::parse_document(&server.get(endpoints::TRANSACTIONS_VIEW).await.text());
        assert_eq!(count(&transactions, "#empty-transactions"), 1);

        let analytics = Html::parse_document(&server.get(endpoints::ANALYTICS_VIEW).await.text());
        assert_eq!(count(&analytics, "#analytics-empty"), 1);
    }

    #[tokio::test]
    async fn create_list_and_delete_transaction() {
        let server = get_test_server();
        let today = OffsetDateTime::now_utc().date().to_string();

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("type_", "expense"),
                ("description", "Coffee at Starbucks"),
                ("amount", "5.50"),
                ("category", "Food"),
                ("date", today.as_str()),
            ])
            .await
            .assert_status_see_other();

        let report = get_report(&server).await;
        assert_eq!(report["summary"]["expenses"], 5.5);
        assert_eq!(report["summary"]["balance"], -5.5);

        let page = Html::parse_document(&server.get(endpoints::TRANSACTIONS_VIEW).await.text());
        let delete_url = page
            .select(&Selector::parse("[hx-delete]").unwrap())
            .next()
            .and_then(|button| button.value().attr("hx-delete"))
            .expect("no delete button")
            .to_owned();
        assert_eq!(delete_url, format_endpoint(endpoints::DELETE_TRANSACTION, 1));

        server.delete(&delete_url).await.assert_status_ok();
        server
            .delete(&delete_url)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let report = get_report(&server).await;
        assert_eq!(report["summary"]["expenses"], 0.0);
        assert_eq!(report["monthly"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn invalid_form_is_bad_request() {
        let server = get_test_server();
        let today = OffsetDateTime::now_utc().date().to_string();

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("type_", "income"),
                ("description", "   "),
                ("amount", "10"),
                ("category", "Salary"),
                ("date", today.as_str()),
            ])
            .await
            .assert_status_bad_request();

        assert_eq!(get_report(&server).await["summary"]["income"], 0.0);
    }

    #[tokio::test]
    async fn sample_transactions_feed_analytics() {
        let server = get_test_server();

        server
            .post(endpoints::SAMPLE_TRANSACTIONS_API)
            .await
            .assert_status_see_other();

        let report = get_report(&server).await;
        assert_eq!(report["summary"]["income"], 3500.0);
        assert_eq!(report["summary"]["expenses"], 5.5);
        assert_eq!(report["summary"]["balance"], 3494.5);
        assert_eq!(report["top_expense_categories"][0]["category"], "Food");
        assert_eq!(report["top_income_categories"][0]["category"], "Salary");

        let analytics = Html::parse_document(&server.get(endpoints::ANALYTICS_VIEW).await.text());
        assert_eq!(count(&analytics, "#monthly-trend [data-month]"), 1);
    }
}
