use std::sync::Arc;
use std::thread;

use serde_json::json;

use digit_ocr::network::{Network, NetworkConfig, WeightFile};
use digit_ocr::OcrService;

fn service(dir: &tempfile::TempDir) -> OcrService {
    OcrService::new(Network::new(NetworkConfig::default()), dir.path().join("nn.json"))
}

fn stroke(offset: usize) -> Vec<f64> {
    (0..400).map(|i| if (i + offset) % 23 == 0 { 0.8 } else { 0.0 }).collect()
}

#[test]
fn predict_request_returns_a_digit() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    let body = json!({ "predict": true, "image": stroke(0) }).to_string();
    let reply = svc.handle(body);
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["type"], "test");
    assert!(reply.body["result"].as_u64().unwrap() < 10);
}

#[test]
fn short_image_is_a_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    let reply = svc.handle(json!({ "predict": true, "image": [0.1, 0.2] }).to_string());
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["ok"], false);
    assert!(reply.body["error"].as_str().unwrap().contains("expected 400"));
}

#[test]
fn unrecognised_bodies_are_client_errors() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    assert_eq!(svc.handle("not json").status, 400);
    assert_eq!(svc.handle("{}").status, 400);
    assert_eq!(svc.handle(r#"{"predict":true}"#).status, 400);
}

#[test]
fn train_request_updates_and_persists_weights() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    let before = svc.snapshot();

    let body = json!({
        "train": true,
        "trainArray": [
            { "y0": stroke(3), "label": 6 },
            { "y0": [0.5, 0.5], "label": 6 },
        ],
    });
    let reply = svc.handle(body.to_string());
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, json!({ "type": "train", "trained": 1, "skipped": 1 }));

    let after = svc.snapshot();
    assert_ne!(after, before);
    let on_disk = WeightFile::read(svc.weights_path()).unwrap().unwrap();
    assert_eq!(on_disk, after);
}

#[test]
fn undecodable_entries_are_skipped_and_the_rest_trains() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    let before = svc.snapshot();

    let body = json!({
        "train": true,
        "trainArray": [
            { "y0": stroke(4), "label": 3 },
            { "y0": stroke(5), "label": 1e20 },
            { "y0": stroke(6), "label": "3" },
        ],
    });
    let reply = svc.handle(body.to_string());
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, json!({ "type": "train", "trained": 1, "skipped": 2 }));
    assert_ne!(svc.snapshot(), before);

    let for_null = json!({
        "train": true,
        "trainArray": [
            { "y0": stroke(4), "label": 3.0 },
            { "y0": stroke(4), "label": null },
        ],
    });
    let reply = svc.handle(for_null.to_string());
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, json!({ "type": "train", "trained": 0, "skipped": 2 }));
}

#[test]
fn empty_training_request_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    let before = svc.snapshot();
    let reply = svc.handle(r#"{"train":true,"trainArray":[]}"#);
    assert_eq!(reply.status, 200);
    assert_eq!(svc.snapshot(), before);
    assert!(!svc.weights_path().exists());
}

#[test]
fn concurrent_requests_leave_a_consistent_model() {
    let dir = tempfile::tempdir().unwrap();
    let svc = Arc::new(service(&dir));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let svc = svc.clone();
            thread::spawn(move || {
                for i in 0..5 {
                    let train = json!({
                        "train": true,
                        "trainArray": [{ "y0": stroke(t * 5 + i), "label": (t + i) % 10 }],
                    });
                    assert_eq!(svc.handle(train.to_string()).status, 200);
                    let predict = json!({ "predict": true, "image": stroke(i) });
                    assert_eq!(svc.handle(predict.to_string()).status, 200);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let on_disk = WeightFile::read(svc.weights_path()).unwrap().unwrap();
    assert_eq!(on_disk, svc.snapshot());
    let reloaded = Network::initialize(NetworkConfig::default(), Some(svc.weights_path())).unwrap();
    assert_eq!(reloaded.snapshot(), on_disk);
}
