//! 请求形态测试：通过脚本化传输检查方法、地址、请求头与请求体。

use crate::blob::MemoryFile;
use crate::tests::{RecordingHook, ScriptedTransport, header_of, query_of, sample_bytes, wait_for_dequeue};
use crate::transport::{RequestBody, UploadRequest};
use crate::uploader::{ChunkParamNames, Params, UploadHandler, UploadOptions};

const ENDPOINT: &str = "https://example.com/upload";

/// 上传一个文件直到出队，返回全部请求。
async fn upload_and_collect(options: UploadOptions, params: Params, file: MemoryFile) -> Vec<UploadRequest> {
    let transport = ScriptedTransport::new();
    let hook = RecordingHook::new();
    let handler = UploadHandler::builder(options)
        .transport(transport.clone())
        .params_source(params)
        .with_hook(hook.clone())
        .build()
        .unwrap();

    let id = handler.add(file);
    handler.upload(id).unwrap();
    wait_for_dequeue(&hook, id).await;
    transport.requests()
}

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn raw_body_puts_params_and_name_in_query() {
    let file = MemoryFile::new("a b.txt", sample_bytes(50)).with_mime_type("text/plain");
    let requests = upload_and_collect(UploadOptions::new(ENDPOINT), params(&[("foo", "bar")]), file).await;

    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, reqwest::Method::POST);
    assert_eq!(req.url.path(), "/upload");

    assert_eq!(req.url.query(), Some("foo=bar&qqfile=a%20b.txt"));
    let query = query_of(req);
    assert_eq!(query.get("foo").map(String::as_str), Some("bar"));
    assert_eq!(query.get("qqfile").map(String::as_str), Some("a b.txt"));
    assert!(!query.contains_key("qqpartindex"));

    assert_eq!(header_of(req, "x-requested-with"), Some("XMLHttpRequest"));
    assert_eq!(header_of(req, "x-file-name"), Some("a%20b.txt"));
    assert_eq!(header_of(req, "cache-control"), Some("no-cache"));
    assert_eq!(header_of(req, "content-type"), Some("application/octet-stream"));
    assert_eq!(header_of(req, "x-mime-type"), Some("text/plain"));

    assert!(matches!(&req.body, RequestBody::Raw(blob) if blob.len() == 50));
}

#[tokio::test]
async fn query_params_append_to_existing_endpoint_query() {
    let options = UploadOptions::new("https://example.com/upload?token=t1");
    let file = MemoryFile::new("x&y=z.txt", sample_bytes(5));
    let requests = upload_and_collect(options, params(&[("note", "a+b c")]), file).await;
    assert_eq!(
        requests[0].url.query(),
        Some("token=t1&note=a%2Bb%20c&qqfile=x%26y%3Dz.txt")
    );
}

#[tokio::test]
async fn unknown_mime_type_falls_back_to_octet_stream() {
    let file = MemoryFile::new("data.bin", sample_bytes(10));
    let requests = upload_and_collect(UploadOptions::new(ENDPOINT), Params::new(), file).await;
    assert_eq!(header_of(&requests[0], "x-mime-type"), Some("application/octet-stream"));
}

#[tokio::test]
async fn file_name_header_is_uri_component_encoded() {
    let file = MemoryFile::new("报告 (final)!.pdf", sample_bytes(10));
    let requests = upload_and_collect(UploadOptions::new(ENDPOINT), Params::new(), file).await;
    assert_eq!(
        header_of(&requests[0], "x-file-name"),
        Some("%E6%8A%A5%E5%91%8A%20(final)!.pdf")
    );
}

#[tokio::test]
async fn params_in_body_use_multipart_fields() {
    let options = UploadOptions::new(ENDPOINT).params_in_body(true).chunked(400);
    let file = MemoryFile::new("a.bin", sample_bytes(1000)).with_mime_type("image/png");
    let requests = upload_and_collect(options, params(&[("foo", "bar")]), file).await;

    assert_eq!(requests.len(), 3);
    let req = &requests[0];
    assert_eq!(req.url.query(), None);
    assert_eq!(header_of(req, "content-type"), None);
    assert_eq!(header_of(req, "x-mime-type"), None);

    match &req.body {
        RequestBody::Multipart {
            fields,
            file_field,
            file_name,
            mime_type,
            payload,
        } => {
            let fields: Params = fields.iter().cloned().collect();
            assert_eq!(fields.get("foo").map(String::as_str), Some("bar"));
            assert_eq!(fields.get("qqpartindex").map(String::as_str), Some("0"));
            assert_eq!(fields.get("qqislast").map(String::as_str), Some("false"));
            assert!(!fields.contains_key("qqfile"));
            assert_eq!(file_field, "qqfile");
            assert_eq!(file_name, "a.bin");
            assert_eq!(mime_type.as_deref(), Some("image/png"));
            assert_eq!(payload.len(), 400);
        }
        RequestBody::Raw(_) => panic!("预期为 multipart 请求体"),
    }
}

#[tokio::test]
async fn forced_multipart_keeps_params_in_query() {
    let options = UploadOptions::new(ENDPOINT).force_multipart(true).input_name("upload");
    let file = MemoryFile::new("a.bin", sample_bytes(20));
    let requests = upload_and_collect(options, params(&[("foo", "bar")]), file).await;

    let req = &requests[0];
    let query = query_of(req);
    assert_eq!(query.get("foo").map(String::as_str), Some("bar"));
    assert_eq!(query.get("upload").map(String::as_str), Some("a.bin"));
    match &req.body {
        RequestBody::Multipart { fields, file_field, .. } => {
            assert!(fields.is_empty());
            assert_eq!(file_field, "upload");
        }
        RequestBody::Raw(_) => panic!("预期为 multipart 请求体"),
    }
}

#[tokio::test]
async fn custom_headers_override_builtin_ones() {
    let options = UploadOptions::new(ENDPOINT)
        .header("Cache-Control", "max-age=0")
        .header("X-Token", "secret");
    let requests = upload_and_collect(options, Params::new(), MemoryFile::new("a.bin", sample_bytes(5))).await;

    assert_eq!(header_of(&requests[0], "cache-control"), Some("max-age=0"));
    assert_eq!(header_of(&requests[0], "x-token"), Some("secret"));
}

#[tokio::test]
async fn demo_mode_sends_get() {
    let options = UploadOptions::new(ENDPOINT).demo_mode(true);
    let requests = upload_and_collect(options, Params::new(), MemoryFile::new("a.bin", sample_bytes(5))).await;
    assert_eq!(requests[0].method, reqwest::Method::GET);
}

#[tokio::test]
async fn chunk_metadata_follows_the_plan() {
    let options = UploadOptions::new(ENDPOINT).chunked(400);
    let requests = upload_and_collect(options, Params::new(), MemoryFile::new("a.bin", sample_bytes(1000))).await;

    let rows: Vec<[String; 5]> = requests
        .iter()
        .map(|r| {
            let q = query_of(r);
            [
                q["qqpartindex"].clone(),
                q["qqpartbyteoffset"].clone(),
                q["qqchunksize"].clone(),
                q["qqtotalfilesize"].clone(),
                q["qqislast"].clone(),
            ]
        })
        .collect();

    assert_eq!(
        rows,
        vec![
            ["0", "0", "400", "1000", "false"].map(String::from),
            ["1", "400", "400", "1000", "false"].map(String::from),
            ["2", "800", "200", "1000", "true"].map(String::from),
        ]
    );
    let lens: Vec<u64> = requests.iter().map(|r| r.body.payload().len()).collect();
    assert_eq!(lens, vec![400, 400, 200]);
}

#[tokio::test]
async fn chunk_param_names_are_configurable() {
    let names = ChunkParamNames {
        part_index: "index".into(),
        part_byte_offset: "offset".into(),
        chunk_size: "size".into(),
        total_file_size: "total".into(),
        is_last: "last".into(),
    };
    let options = UploadOptions::new(ENDPOINT).chunked(400).chunk_param_names(names);
    let requests = upload_and_collect(options, Params::new(), MemoryFile::new("a.bin", sample_bytes(500))).await;

    let last = query_of(&requests[1]);
    assert_eq!(last.get("index").map(String::as_str), Some("1"));
    assert_eq!(last.get("offset").map(String::as_str), Some("400"));
    assert_eq!(last.get("size").map(String::as_str), Some("100"));
    assert_eq!(last.get("total").map(String::as_str), Some("500"));
    assert_eq!(last.get("last").map(String::as_str), Some("true"));
    assert!(!last.contains_key("qqpartindex"));
}

#[tokio::test]
async fn params_are_fetched_per_request() {
    let transport = ScriptedTransport::new();
    let hook = RecordingHook::new();
    let handler = UploadHandler::builder(UploadOptions::new(ENDPOINT))
        .transport(transport.clone())
        .params_source(|id: usize| -> Params {
            let id = id.to_string();
            params(&[("fileId", id.as_str())])
        })
        .with_hook(hook.clone())
        .build()
        .unwrap();

    let a = handler.add(MemoryFile::new("a.bin", sample_bytes(5)));
    let b = handler.add(MemoryFile::new("b.bin", sample_bytes(5)));
    handler.upload(a).unwrap();
    handler.upload(b).unwrap();
    wait_for_dequeue(&hook, a).await;
    wait_for_dequeue(&hook, b).await;

    let mut ids: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| query_of(r)["fileId"].clone())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["0".to_string(), "1".to_string()]);
}
