// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use origin_client::{decode_cookies, encode_query, join_url, CookieJar};

fn cookie_benchmark(c: &mut Criterion) {
    let set_cookies = vec![
        "session=abc123; Path=/; HttpOnly; Secure",
        "theme=dark; Max-Age=3600",
        "csrftoken=f00dfeed; SameSite=Lax",
        "flag",
    ];

    c.bench_function("decode_set_cookie", |b| {
        b.iter(|| black_box(decode_cookies(black_box(&set_cookies))))
    });

    let jar = CookieJar::new();
    jar.merge_set_cookies(&set_cookies);
    c.bench_function("encode_cookie_header", |b| {
        b.iter(|| black_box(jar.header_value()))
    });
}

fn url_benchmark(c: &mut Criterion) {
    let params = vec![
        ("q", Some("rust http client")),
        ("page", Some("2")),
        ("filter", None),
        ("lang", Some("en-US")),
    ];

    c.bench_function("encode_query", |b| {
        b.iter(|| black_box(encode_query(black_box(params.clone()))))
    });

    c.bench_function("join_url", |b| {
        b.iter(|| black_box(join_url("https://example.com", ["/api/v1", "../v2", "users"])))
    });
}

criterion_group!(benches, cookie_benchmark, url_benchmark);
criterion_main!(benches);
