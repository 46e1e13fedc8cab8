//! # アクセスログミドルウェア
//!
//! HTTP リクエスト完了時に、メソッド・パス・ステータス・レイテンシを
//! 1 行にまとめたサマリログを出力する tower Layer。
//!
//! `TraceLayer` のスパン内に配置するため、`request_id` は JSON ログに自動的に含まれる。
//!
//! ```text
//! SetRequestIdLayer → TraceLayer → AccessLogLayer → handler
//! ```
//!
//! プローブのように高頻度で叩かれるパスは `quiet_paths` に指定すると、
//! 2xx の応答だけログを抑制する。ドレイン中の 503 のような異常応答は記録される。

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response};
use tower::{Layer, Service};

/// アクセスログを出力する Layer
///
/// - 2xx〜4xx: INFO
/// - 5xx: WARN
/// - 内側の Service がエラーを返した場合: ERROR
///
/// いずれも `log.type = "access"` マーカー付き。
#[derive(Clone, Debug)]
pub struct AccessLogLayer {
    quiet_paths: &'static [&'static str],
}

impl AccessLogLayer {
    /// `quiet_paths` に完全一致するパスは 2xx の応答ではログを出さない
    pub fn new(quiet_paths: &'static [&'static str]) -> Self {
        Self { quiet_paths }
    }
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogService {
            inner,
            quiet_paths: self.quiet_paths,
        }
    }
}

/// [`AccessLogLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct AccessLogService<S> {
    inner:       S,
    quiet_paths: &'static [&'static str],
}

impl<S> AccessLogService<S> {
    fn is_quiet(&self, path: &str) -> bool {
        self.quiet_paths.contains(&path)
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for AccessLogService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を使い、self には clone を残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let quiet = self.is_quiet(req.uri().path());
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) if quiet && response.status().is_success() => {}
                Ok(response) if response.status().is_server_error() => {
                    tracing::warn!(
                        log.r#type = "access",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = response.status().as_u16(),
                        http.latency_ms = latency_ms,
                        "request completed with server error"
                    );
                }
                Ok(response) => {
                    tracing::info!(
                        log.r#type = "access",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = response.status().as_u16(),
                        http.latency_ms = latency_ms,
                        "request completed"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        log.r#type = "access",
                        http.method = %method,
                        http.path = %path,
                        http.latency_ms = latency_ms,
                        error.message = %err,
                        "request failed"
                    );
                }
            }

            result
        })
    }
}
