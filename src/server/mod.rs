//! HTTP 服务器模块
//!
//! 接收图描述、计算最大流，并返回每次增广后的图状态

use crate::algorithm::{compute_max_flow, DepthFirst, PathStrategy, ResidualCut};
use crate::error::{Error, Result};
use crate::export::{export_states, ExportFormat, ExportedState, FlowHistory};
use crate::metrics;
use crate::types::{FlowConfig, FlowInput};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 允许跨域访问的来源，`*` 表示任意来源
    pub allowed_origins: Vec<String>,
    /// 单次计算的时限
    pub request_timeout: Duration,
    /// 核心算法配置
    pub flow: FlowConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            request_timeout: Duration::from_secs(30),
            flow: FlowConfig::default(),
        }
    }
}

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// 构建路由
pub fn router(config: ServerConfig) -> Result<Router> {
    let cors = cors_layer(&config.allowed_origins)?;
    let state = AppState {
        config: Arc::new(config),
    };

    Ok(Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 指标和统计
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        // 最大流
        .route("/calculate-max-flow", post(calculate_max_flow))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        ))
}

/// 只放行配置中的来源
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values = origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| Error::ServerError(format!("无效的来源 {}: {}", o, e)))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

/// 启动服务器
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = router(config)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::ServerError(format!("绑定地址失败: {}", e)))?;
    info!("FlowTrace 服务器启动于 http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::ServerError(format!("服务器错误: {}", e)))?;

    Ok(())
}

// ==================== 处理器 ====================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus 格式指标
async fn metrics_handler() -> Response {
    let prom = metrics::global_metrics().to_prometheus();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        prom.content,
    )
        .into_response()
}

/// 统计信息
async fn stats_handler() -> impl IntoResponse {
    Json(ApiResponse::success(metrics::global_metrics().snapshot()))
}

/// 最大流请求
#[derive(Debug, Deserialize)]
pub struct MaxFlowRequest {
    #[serde(flatten)]
    pub input: FlowInput,
    /// 图状态的导出格式
    #[serde(default)]
    pub format: ExportFormat,
}

/// 最大流响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlowResponse {
    pub run_id: Uuid,
    pub max_flow: f64,
    pub iterations: usize,
    pub strategy: String,
    pub graph_states: Vec<ExportedState>,
    pub residual_cut: ResidualCut,
}

/// 计算最大流
async fn calculate_max_flow(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MaxFlowRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            warn!(error = %rejection, "请求体解析失败");
            return error_response(StatusCode::BAD_REQUEST, &format!("无效的输入数据: {}", rejection));
        }
    };

    let config = state.config.flow.clone();
    let task = tokio::task::spawn_blocking(move || run_request(req, &config));

    // 超时后计算仍在阻塞线程上运行，结果被丢弃
    match tokio::time::timeout(state.config.request_timeout, task).await {
        Ok(Ok(Ok(resp))) => (StatusCode::OK, Json(ApiResponse::success(resp))).into_response(),
        Ok(Ok(Err(e))) if e.is_client_error() => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        Ok(Ok(Err(e))) => {
            error!(error = %e, "最大流计算失败");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
        Ok(Err(join_err)) => {
            error!(error = %join_err, "计算任务异常退出");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "计算任务异常退出")
        }
        Err(_) => {
            metrics::global_metrics().record_timeout();
            warn!(timeout = ?state.config.request_timeout, "最大流计算超时");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "计算超时")
        }
    }
}

fn run_request(req: MaxFlowRequest, config: &FlowConfig) -> Result<MaxFlowResponse> {
    let outcome = compute_max_flow(&req.input, config)?;
    let (source, sink) = req.input.validate()?;
    let history = FlowHistory::from_outcome(outcome, source.clone(), sink.clone(), DepthFirst.name());
    let graph_states = export_states(req.format, &history.snapshots)?;

    Ok(MaxFlowResponse {
        run_id: history.run_id,
        max_flow: history.max_flow,
        iterations: history.iterations(),
        strategy: history.strategy,
        graph_states,
        residual_cut: history.residual_cut,
    })
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    (status, Json(ApiResponse::<()>::error(msg))).into_response()
}

/// API 响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(ServerConfig::default()).unwrap()
    }

    async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/calculate-max-flow")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn diamond() -> Value {
        json!({
            "nodes": ["A", "B", "C", "D"],
            "edges": [
                {"source": "A", "target": "B", "capacity": 3},
                {"source": "A", "target": "C", "capacity": 2},
                {"source": "B", "target": "D", "capacity": 2},
                {"source": "C", "target": "D", "capacity": 3}
            ],
            "source": "A",
            "sink": "D"
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_calculate_max_flow() {
        let (status, body) = post_json(app(), diamond()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["maxFlow"], 4.0);
        assert_eq!(body["iterations"], 2);
        assert_eq!(body["graphStates"].as_array().unwrap().len(), 2);
        assert_eq!(body["graphStates"][1]["totalFlow"], 4.0);
        assert_eq!(body["residualCut"]["capacity"], 4.0);
    }

    #[tokio::test]
    async fn test_dot_format() {
        let mut req = diamond();
        req["format"] = json!("dot");
        let (status, body) = post_json(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        let first = body["graphStates"][0].as_str().unwrap();
        assert!(first.starts_with("digraph flow_1"));
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request() {
        let mut req = diamond();
        req["edges"] = json!([]);
        let (status, body) = post_json(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_same_endpoints_is_bad_request() {
        let mut req = diamond();
        req["sink"] = json!("A");
        let (status, _) = post_json(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/calculate-max-flow")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_iteration_cap_from_config() {
        let config = ServerConfig {
            flow: FlowConfig::with_max_iterations(1),
            ..ServerConfig::default()
        };
        let (status, body) = post_json(router(config).unwrap(), diamond()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains('1'));
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin_only() {
        let preflight = |origin: &'static str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/calculate-max-flow")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap()
        };

        let allowed = app().oneshot(preflight("http://localhost:3000")).await.unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );

        let denied = app().oneshot(preflight("http://evil.example")).await.unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_metrics_and_stats() {
        post_json(app(), diamond()).await;

        let response = app()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("flowtrace_computations_total"));

        let response = app()
            .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert!(body["total_computations"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let config = ServerConfig {
            allowed_origins: vec!["bad\norigin".to_string()],
            ..ServerConfig::default()
        };
        assert!(router(config).is_err());
    }
}
