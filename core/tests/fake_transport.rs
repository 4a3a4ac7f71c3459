//! Drive the composed operations through a recording fake transport.
//!
//! # Design
//! The fake records every request it is handed and answers with a canned
//! response or transport error, so each test can assert both on what went
//! over the wire and on how many requests were sent at all.

use std::cell::RefCell;

use serde_json::json;
use vegetable_core::{
    ApiError, Failure, HttpMethod, HttpRequest, HttpResponse, ListParams, NewVegetable, Transport,
    TransportError, VegetableChanges, VegetableClient,
};

const ENDPOINT: &str = "https://api.example.test/vegetables";

struct FakeTransport {
    reply: Result<(u16, String), TransportError>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    fn responding(status: u16, body: serde_json::Value) -> Self {
        Self {
            reply: Ok((status, body.to_string())),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(TransportError::new(message)),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        let (status, body) = self.reply.clone()?;
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn client() -> VegetableClient {
    VegetableClient::new(ENDPOINT)
}

fn sent_body(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
}

fn assert_validation(err: ApiError, expected: &str) {
    match err {
        ApiError::ValidationError(msg) => assert_eq!(msg, expected),
        other => panic!("expected ValidationError({expected:?}), got {other:?}"),
    }
}

#[test]
fn list_issues_one_get_with_page_and_limit() {
    let transport = FakeTransport::responding(
        200,
        json!({
            "page": 1,
            "pages": 10,
            "total": 50,
            "data": [
                {"id": 1, "name": "Cà rốt", "price": 12000, "group": "Củ", "description": "Cà rốt Đà Lạt"},
                {"id": 2, "name": "Cải thảo", "price": 15000, "group": "Lá", "description": null}
            ]
        }),
    );

    let page = client().list(&transport, ListParams::page(1)).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].url, format!("{ENDPOINT}?page=1&limit=5"));
    assert!(requests[0].body.is_none());
    assert_eq!(page.pages, 10);
    assert_eq!(page.total, 50);
    assert!(page.data.len() <= 5);
    assert_eq!(page.data[0].name, "Cà rốt");
}

#[test]
fn create_without_name_and_price_sends_nothing() {
    let transport = FakeTransport::responding(201, json!({}));

    let err = client().create(&transport, &NewVegetable::default()).unwrap_err();

    assert_validation(err, "name and price are required");
    assert!(transport.requests().is_empty());
}

#[test]
fn create_posts_exact_body_and_returns_server_id() {
    let transport = FakeTransport::responding(
        201,
        json!({
            "message": "Thêm rau củ thành công",
            "data": {
                "id": 51,
                "name": "Rau muống",
                "price": 15000,
                "group": "Lá",
                "description": "Rau muống tươi ngon"
            }
        }),
    );
    let input = NewVegetable::new("Rau muống", 15000.0)
        .group("Lá")
        .description("Rau muống tươi ngon");

    let created = client().create(&transport, &input).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, ENDPOINT);
    assert_eq!(
        sent_body(&requests[0]),
        json!({
            "name": "Rau muống",
            "price": 15000,
            "group": "Lá",
            "description": "Rau muống tươi ngon"
        })
    );
    assert_eq!(created.message, "Thêm rau củ thành công");
    assert_eq!(created.data.id, 51);
}

#[test]
fn update_without_fields_sends_nothing() {
    let transport = FakeTransport::responding(200, json!({}));

    let err = client()
        .update(&transport, 51, &VegetableChanges::default())
        .unwrap_err();

    assert_validation(err, "at least one field required");
    assert!(transport.requests().is_empty());
}

#[test]
fn update_puts_changes_to_id() {
    let transport = FakeTransport::responding(
        200,
        json!({"message": "Cập nhật thành công", "updated_fields": ["price"]}),
    );

    let updated = client()
        .update(&transport, 51, &VegetableChanges::default().price(18000.0))
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(requests[0].url, format!("{ENDPOINT}?id=51"));
    assert_eq!(sent_body(&requests[0]), json!({"price": 18000}));
    assert_eq!(updated.updated_fields, vec!["price"]);
}

#[test]
fn update_without_id_fails_regardless_of_changes() {
    let transport = FakeTransport::responding(200, json!({}));

    let err = client()
        .update(&transport, None, &VegetableChanges::default().price(1.0))
        .unwrap_err();

    assert_validation(err, "id is required");
    assert!(transport.requests().is_empty());
}

#[test]
fn delete_issues_one_delete_to_id() {
    let transport = FakeTransport::responding(200, json!({"message": "Xóa thành công"}));

    let deleted = client().delete(&transport, 51).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].url, format!("{ENDPOINT}?id=51"));
    assert_eq!(deleted.message, "Xóa thành công");
}

#[test]
fn delete_without_id_sends_nothing() {
    let transport = FakeTransport::responding(200, json!({}));

    let err = client().delete(&transport, None).unwrap_err();

    assert_validation(err, "id is required");
    assert!(transport.requests().is_empty());
}

#[test]
fn transport_failure_surfaces_as_request_failed() {
    let c = client();
    let transport = FakeTransport::failing("connection reset by peer");

    let errors = [
        c.list(&transport, ListParams::default()).unwrap_err(),
        c.create(&transport, &NewVegetable::new("Rau muống", 15000.0)).unwrap_err(),
        c.update(&transport, 51, &VegetableChanges::default().description("x")).unwrap_err(),
        c.delete(&transport, 51).unwrap_err(),
    ];

    assert_eq!(transport.requests().len(), 4);
    for err in errors {
        match err {
            ApiError::RequestFailed(Failure::Transport(msg)) => {
                assert_eq!(msg, "connection reset by peer")
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
    }
}

#[test]
fn remote_error_body_is_passed_through() {
    let transport = FakeTransport::responding(404, json!({"error": "Không tìm thấy rau củ"}));

    let err = client().delete(&transport, 51).unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.remote_payload(),
        Some(&json!({"error": "Không tìm thấy rau củ"}))
    );
}

#[test]
fn works_through_a_trait_object() {
    let transport = FakeTransport::responding(200, json!({"message": "ok"}));
    let dynamic: &dyn Transport = &transport;

    client().delete(dynamic, 3).unwrap();

    assert_eq!(transport.requests()[0].url, format!("{ENDPOINT}?id=3"));
}
