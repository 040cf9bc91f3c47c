//! API integration tests
//!
//! These run against a live server backed by a database created from
//! `sql/schema.sql`.

use reqwest::{multipart, Client, StatusCode};
use rust_xlsxwriter::Workbook;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000/api/v1";

fn students_workbook(rows: &[[&str; 4]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Relação de alunos").unwrap();
    let header = ["Matrícula", "Nome", "Cidade", "Data de Nascimento"];
    for (c, value) in header.iter().enumerate() {
        sheet.write_string(1, c as u16, *value).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(r as u32 + 2, c as u16, *value).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

async fn upload(client: &Client, bytes: Vec<u8>) -> reqwest::Response {
    let part = multipart::Part::bytes(bytes).file_name("alunos.xlsx");
    let form = multipart::Form::new().part("file", part);
    client
        .post(format!("{}/students/import", BASE_URL))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request")
}

async fn staged(client: &Client) -> Vec<Value> {
    client
        .get(format!("{}/students/imports", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_import_upserts_by_registration_number() {
    let client = Client::new();

    let first = students_workbook(&[
        ["900001", "Ana", "Vitória da Conquista", "15/07/2005"],
        ["900002", "Caio", "Salvador", "01/02/2006"],
    ]);
    let response = upload(&client, first).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_importados"], 1);

    let second = students_workbook(&[["900001", "Ana Maria", "VITORIA DA CONQUISTA", "2005-07-15"]]);
    let response = upload(&client, second).await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = staged(&client).await;
    let ana: Vec<_> = rows
        .iter()
        .filter(|r| r["registration_number"] == "900001")
        .collect();
    assert_eq!(ana.len(), 1);
    assert_eq!(ana[0]["name"], "Ana Maria");
    assert_eq!(ana[0]["birth_date"], "2005-07-15");
    assert_eq!(ana[0]["city"], "vitoria da conquista");
    assert!(rows.iter().all(|r| r["registration_number"] != "900002"));
}

#[tokio::test]
#[ignore]
async fn test_import_without_matching_city() {
    let client = Client::new();

    let bytes = students_workbook(&[["900003", "Bia", "Ilhéus", "03/03/2007"]]);
    let response = upload(&client, bytes).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert!(body["errors"]["city"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "isbn": "978-0-00-000001-1",
            "title": "Dom Casmurro",
            "author": "Machado de Assis"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let book: Value = response.json().await.unwrap();
    assert_eq!(book["isbn"], "9780000000011");

    // Same digits, different punctuation
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "isbn": "9780000000011", "title": "Dom Casmurro" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/copies", BASE_URL))
        .json(&json!({ "book_isbn": "9780000000011", "condition": "New" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let copy: Value = response.json().await.unwrap();

    // Refused while a copy exists
    let response = client
        .delete(format!("{}/books/9780000000011", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .delete(format!("{}/copies/{}", BASE_URL, copy["id"]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .delete(format!("{}/books/9780000000011", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_dashboard_summary() {
    let client = Client::new();

    let response = client
        .get(format!("{}/dashboard/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert!(body["students"].is_number());
    assert!(body["open_loans"].is_number());
}
