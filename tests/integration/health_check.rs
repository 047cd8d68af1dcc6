// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{setup, test_server};

#[tokio::test]
async fn test_health_check() {
    let ctx = setup().await;
    let server = test_server(&ctx);

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_version() {
    let ctx = setup().await;
    let server = test_server(&ctx);

    let response = server.get("/v1/version").await;
    response.assert_status_ok();
    response.assert_text(env!("CARGO_PKG_VERSION"));
}
