//! Integration tests against a running attendance backend.
//!
//! These tests need a reachable backend and are ignored by default. To run
//! them, create a `.env` file in the attendance-lib directory with:
//!
//! ```env
//! ATTENDANCE_API_BASE_URL=http://localhost:8000
//! ATTENDANCE_FROM_DATE=01/05/2024
//! ATTENDANCE_TO_DATE=07/05/2024
//! ```
//!
//! Then run: `cargo test -p attendance-lib -- --ignored`

use std::env;
use std::time::Duration;

use attendance_lib::AttendanceClient;
use attendance_lib::api::DateRange;
use attendance_lib::explorer::Explorer;
use attendance_lib::views;

fn load_env() -> Option<(AttendanceClient, DateRange)> {
    let _ = dotenvy::dotenv();

    let url = env::var("ATTENDANCE_API_BASE_URL").ok()?;
    let from = env::var("ATTENDANCE_FROM_DATE").ok()?;
    let to = env::var("ATTENDANCE_TO_DATE").ok()?;

    let client = AttendanceClient::builder()
        .url(url)
        .timeout(Duration::from_secs(30))
        .build()
        .ok()?;
    let range = DateRange::parse(&from, &to).ok()?;
    Some((client, range))
}

#[tokio::test]
#[ignore = "requires a running backend configured in .env"]
async fn test_attendance_search_feeds_explorer() {
    let (client, range) =
        load_env().expect("Missing required environment variables. See module docs.");

    let rows = client.attendance().load(&range, "").await.unwrap();
    let explorer = Explorer::with_rows(views::attendance(), rows.clone());

    assert_eq!(explorer.total_count(), rows.len());
    for row in explorer.rows() {
        assert!(row.contains("empcode"));
        assert!(row.contains("date_string"));
    }
}

#[tokio::test]
#[ignore = "requires a running backend configured in .env"]
async fn test_file_listing() {
    let (client, _) = load_env().expect("Missing required environment variables. See module docs.");

    let list = client.files().list().limit(5).await.unwrap();
    assert!(list.files.len() <= 5);
}

#[tokio::test]
#[ignore = "requires a running backend configured in .env"]
async fn test_mcid_process_shape() {
    let (client, range) =
        load_env().expect("Missing required environment variables. See module docs.");

    let process = client.mcid_data().process(&range).await.unwrap();
    let config = views::mcid_for(&process.rows);
    if !process.rows.is_empty() {
        assert_eq!(config.columns()[5].header, "Total Time");
    }
}
