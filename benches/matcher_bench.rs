use cookiesync::store::record::CookieSnapshot;
use cookiesync::sync::matcher;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn build_snapshot(domains: usize, cookies_per_domain: usize) -> CookieSnapshot {
    let mut map = serde_json::Map::new();
    for i in 0..domains {
        let domain = format!("site{i}.com");
        let records: Vec<serde_json::Value> = (0..cookies_per_domain)
            .map(|j| json!({"name": format!("c{j}"), "value": "v", "domain": format!(".{domain}")}))
            .collect();
        map.insert(domain, json!(records));
    }
    map.insert(
        "bilibili.com".to_string(),
        json!([
            {"name": "SESSDATA", "value": "s", "domain": ".bilibili.com"},
            {"name": "buvid3", "value": "b", "domain": "live.bilibili.com"}
        ]),
    );
    CookieSnapshot::from_json(&serde_json::Value::Object(map))
}

fn benchmark_select(c: &mut Criterion) {
    let snapshot = build_snapshot(200, 10);

    c.bench_function("matcher_select", |b| {
        b.iter(|| {
            black_box(matcher::select(black_box("bilibili.com"), &snapshot));
        })
    });
}

fn benchmark_format(c: &mut Criterion) {
    let snapshot = build_snapshot(200, 10);
    let matched = matcher::select("site0.com", &snapshot);

    c.bench_function("matcher_format_header", |b| {
        b.iter(|| {
            black_box(matcher::format_cookie_header(black_box(&matched)));
        })
    });
}

criterion_group!(benches, benchmark_select, benchmark_format);
criterion_main!(benches);
