// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::schedule_request::ScheduleRequestDto,
        use_cases::scan_use_case::{ScanUseCase, ScanUseCaseError},
    },
    domain::repositories::{
        scan_repository::ScanRepository, url_list_repository::UrlListRepository,
    },
};

/// 查询列表的扫描可用性
pub async fn get_scan_availability<LR, SR>(
    Extension(list_repo): Extension<Arc<LR>>,
    Extension(scan_repo): Extension<Arc<SR>>,
    Path(list_id): Path<Uuid>,
) -> impl IntoResponse
where
    LR: UrlListRepository + 'static,
    SR: ScanRepository + 'static,
{
    let use_case = ScanUseCase::new(list_repo, scan_repo);
    match use_case.scan_availability(list_id, Utc::now()).await {
        Ok(availability) => (StatusCode::OK, Json(availability)).into_response(),
        Err(e) => error_response(e),
    }
}

/// 修改列表的复扫策略
pub async fn update_schedule<LR, SR>(
    Extension(list_repo): Extension<Arc<LR>>,
    Extension(scan_repo): Extension<Arc<SR>>,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<ScheduleRequestDto>,
) -> impl IntoResponse
where
    LR: UrlListRepository + 'static,
    SR: ScanRepository + 'static,
{
    let use_case = ScanUseCase::new(list_repo, scan_repo);
    match use_case.change_schedule(list_id, payload, Utc::now()).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => error_response(e),
    }
}

/// 手动发起扫描
pub async fn request_scan<LR, SR>(
    Extension(list_repo): Extension<Arc<LR>>,
    Extension(scan_repo): Extension<Arc<SR>>,
    Path(list_id): Path<Uuid>,
) -> impl IntoResponse
where
    LR: UrlListRepository + 'static,
    SR: ScanRepository + 'static,
{
    let use_case = ScanUseCase::new(list_repo, scan_repo);
    match use_case.request_manual_scan(list_id, Utc::now()).await {
        Ok(scan) => (StatusCode::CREATED, Json(scan)).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: ScanUseCaseError) -> axum::response::Response {
    let (status, msg): (StatusCode, String) = err.into();
    (status, Json(json!({ "error": msg }))).into_response()
}

impl From<ScanUseCaseError> for (StatusCode, String) {
    fn from(err: ScanUseCaseError) -> Self {
        match err {
            ScanUseCaseError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ScanUseCaseError::InvalidPolicy(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ScanUseCaseError::NotFound => (StatusCode::NOT_FOUND, "Url list not found".to_string()),
            e @ ScanUseCaseError::Unavailable(_) => (StatusCode::CONFLICT, e.to_string()),
            e @ ScanUseCaseError::Contended(_) => (StatusCode::CONFLICT, e.to_string()),
            ScanUseCaseError::Repository(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}
