// tests/api_tests.rs

use ecoquiz::{Db, config::Config, routes, state::AppState};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Fresh in-memory storage, seeded like a first run
    let db = Db::in_memory();
    db.initialize().expect("Failed to initialize storage");

    // 2. Create test configuration and state
    let config = Config {
        rust_log: "error".to_string(),
        ..Config::default()
    };
    let state = AppState::new(db, config);

    // 3. Create the router with the app state
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn unique_email() -> String {
    format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8])
}

async fn register_and_login(client: &reqwest::Client, address: &str, level: &str) -> String {
    let email = unique_email();

    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "email": email,
            "name": "Tester",
            "password": "password123",
            "level": level
        }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(response.status().as_u16(), 201);

    let response = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "email": email, "password": "password123" }))
        .send()
        .await
        .expect("Login failed");
    assert_eq!(response.status().as_u16(), 200);

    email
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works_and_hides_password() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();

    // Act
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "email": email,
            "name": "Ana",
            "password": "password123",
            "level": "school"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["totalScore"], 0);
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn register_fails_validation_and_duplicates() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();
    let payload = serde_json::json!({
        "email": email,
        "name": "Bo",
        "password": "password123",
        "level": "college"
    });

    // Act: Invalid email
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "email": "not-an-email",
            "name": "Bo",
            "password": "password123",
            "level": "college"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    // Act: Same email twice
    let first = client
        .post(format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    let second = client
        .post(format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(first.status().as_u16(), 201);
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn me_requires_login_and_logout_redirects() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    // Logged out
    let response = client.get(format!("{}/api/me", address)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // Logged in
    let email = register_and_login(&client, &address, "school").await;
    let me: serde_json::Value = client
        .get(format!("{}/api/me", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["email"], email.as_str());

    // Logout sends the browser to the index page
    let response = client
        .post(format!("{}/api/auth/logout", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/");

    let response = client.get(format!("{}/api/me", address)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn test_quiz_flow() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = register_and_login(&client, &address, "school").await;

    // 1. List quizzes (answers are not exposed)
    let quizzes: Vec<serde_json::Value> = client
        .get(format!("{}/api/quizzes/school", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(quizzes.len(), 2);
    assert!(quizzes[0]["questions"][0].get("correctAnswer").is_none());

    // 2. Unknown quiz and unknown level
    let response = client
        .get(format!("{}/api/quizzes/school/999", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let response = client
        .get(format!("{}/api/quizzes/university", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // 3. Submit quiz 1 with both answers right (3, 2)
    let result: serde_json::Value = client
        .post(format!("{}/api/quizzes/school/1/submit", address))
        .json(&serde_json::json!({ "answers": [3, 2] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(result["score"], 2);
    assert_eq!(result["totalQuestions"], 2);

    // 4. Performance and leaderboard reflect the attempt
    let performance: Vec<serde_json::Value> = client
        .get(format!("{}/api/me/performance", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(performance.len(), 1);
    assert_eq!(performance[0]["userId"], email.as_str());
    assert_eq!(performance[0]["quizId"], 1);

    let board: Vec<serde_json::Value> = client
        .get(format!("{}/api/leaderboard/school", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0]["totalScore"], 2);

    let college: Vec<serde_json::Value> = client
        .get(format!("{}/api/leaderboard/college", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(college.is_empty());
}

#[tokio::test]
async fn notifications_for_unknown_audience_are_empty() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let feed: serde_json::Value = client
        .get(format!("{}/api/notifications/parents", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(feed["notifications"], serde_json::json!([]));
    assert_eq!(feed["unreadCount"], 0);

    let response = client
        .post(format!("{}/api/notifications/parents/1/read", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);
}
