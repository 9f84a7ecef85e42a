//! Minimal path-style S3 endpoint for exercising `S3Bucket` over HTTP.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use s3::bucket::Bucket as RemoteBucket;
use s3::creds::Credentials;
use s3::region::Region;
use tokio::net::TcpListener;

#[derive(Default)]
pub struct StubState {
    pub objects: BTreeMap<String, Vec<u8>>,
    /// Query parameters of every listing request, in order.
    pub list_requests: Vec<HashMap<String, String>>,
    /// Maximum entries per listing page; unlimited when `None`.
    pub page_size: Option<usize>,
}

pub type Stub = Arc<Mutex<StubState>>;

/// Serve a fresh stub on an ephemeral port and return a client bound to
/// `bucket` on it.
pub async fn spawn(bucket: &str) -> (Stub, Box<RemoteBucket>) {
    let stub: Stub = Arc::default();
    let app = Router::new()
        .route("/{bucket}", get(list_objects))
        .route("/{bucket}/", get(list_objects))
        .route(
            "/{bucket}/{*key}",
            get(get_object).put(put_object).delete(delete_object),
        )
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let region = Region::Custom {
        region: "us-east-1".to_string(),
        endpoint: format!("http://{addr}"),
    };
    let credentials = Credentials::new(Some("access"), Some("secret"), None, None, None).unwrap();
    let client = RemoteBucket::new(bucket, region, credentials)
        .unwrap()
        .with_path_style();
    (stub, client)
}

fn no_such_key() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "application/xml")],
        "<Error><Code>NoSuchKey</Code></Error>",
    )
        .into_response()
}

// GET and HEAD
async fn get_object(
    State(stub): State<Stub>,
    Path((_bucket, key)): Path<(String, String)>,
) -> Response {
    match stub.lock().unwrap().objects.get(&key) {
        Some(data) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/octet-stream"),
                (header::ETAG, "\"stub\""),
            ],
            data.clone(),
        )
            .into_response(),
        None => no_such_key(),
    }
}

async fn put_object(
    State(stub): State<Stub>,
    Path((_bucket, key)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    stub.lock().unwrap().objects.insert(key, body.to_vec());
    (StatusCode::OK, [(header::ETAG, "\"stub\"")]).into_response()
}

async fn delete_object(
    State(stub): State<Stub>,
    Path((_bucket, key)): Path<(String, String)>,
) -> Response {
    // S3 answers 204 whether or not the key existed
    stub.lock().unwrap().objects.remove(&key);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_objects(
    State(stub): State<Stub>,
    Path(bucket): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = stub.lock().unwrap();
    state.list_requests.push(query.clone());

    let prefix = query.get("prefix").cloned().unwrap_or_default();
    let delimiter = query.get("delimiter").cloned().filter(|d| !d.is_empty());

    let mut keys = Vec::new();
    let mut common = BTreeSet::new();
    for key in state.objects.keys().filter(|k| k.starts_with(&prefix)) {
        let rest = &key[prefix.len()..];
        match delimiter.as_deref().and_then(|d| rest.find(d).map(|i| (d, i))) {
            Some((d, i)) => {
                common.insert(format!("{prefix}{}", &rest[..i + d.len()]));
            }
            None => keys.push(key.clone()),
        }
    }

    let mut common: Vec<String> = common.into_iter().collect();
    let mut truncated = false;
    if let Some(size) = state.page_size {
        if keys.len() + common.len() > size {
            truncated = true;
            keys.truncate(size);
            common.truncate(size - keys.len());
        }
    }

    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push_str(r#"<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">"#);
    xml.push_str(&format!("<Name>{bucket}</Name><Prefix>{prefix}</Prefix>"));
    xml.push_str(&format!(
        "<KeyCount>{}</KeyCount><MaxKeys>1000</MaxKeys>",
        keys.len() + common.len()
    ));
    if let Some(d) = &delimiter {
        xml.push_str(&format!("<Delimiter>{d}</Delimiter>"));
    }
    xml.push_str(&format!("<IsTruncated>{truncated}</IsTruncated>"));
    if truncated {
        xml.push_str("<NextContinuationToken>page-2</NextContinuationToken>");
    }
    for key in &keys {
        let size = state.objects[key].len();
        xml.push_str(&format!(
            "<Contents><Key>{key}</Key><LastModified>2026-10-18T00:00:00.000Z</LastModified>\
             <ETag>&quot;stub&quot;</ETag><Size>{size}</Size><StorageClass>STANDARD</StorageClass></Contents>"
        ));
    }
    for prefix in &common {
        xml.push_str(&format!(
            "<CommonPrefixes><Prefix>{prefix}</Prefix></CommonPrefixes>"
        ));
    }
    xml.push_str("</ListBucketResult>");

    (StatusCode::OK, [(header::CONTENT_TYPE, "application/xml")], xml).into_response()
}
