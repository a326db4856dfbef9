//! Exercises the public facade the way a downstream crate would.

use komichi::prelude::*;
use rstest::rstest;

async fn pong(_request: Request) -> Result<Response> {
	Ok(Response::ok().with_body("pong"))
}

#[rstest]
#[tokio::test]
async fn test_facade_routes_and_groups() {
	let mut router = Router::new();
	router.use_middleware(LoggingMiddleware::new());
	router.add_fn(Method::GET, "/ping", pong);

	let mut api = router.group("/api/v1");
	api.add_fn(Method::GET, "/users/:id", |request: Request| async move {
		let id = request.path_param("id").unwrap_or_default().to_string();
		Ok(Response::ok().with_body(id))
	});

	let request = Request::builder().uri("/ping").build().unwrap();
	let response = router.dispatch(request).await.unwrap();
	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.body_text(), "pong");

	let request = Request::builder().uri("/api/v1/users/31").build().unwrap();
	let response = router.dispatch(request).await.unwrap();
	assert_eq!(response.body_text(), "31");

	let request = Request::builder().uri("/nope").build().unwrap();
	let response = router.dispatch(request).await.unwrap();
	assert_eq!(response.status, StatusCode::NOT_FOUND);
}
