//! Request Gateway
//!
//! The single outbound pipeline to the records server. Every request runs
//! the outbound hooks, goes through the transport, then runs the inbound
//! hooks before its status is mapped to a result for the caller.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::repository::{CredentialStore, SessionReset};
use crate::domain::transport::{ApiRequest, ApiResponse, Transport};
use crate::domain::view::Navigator;
use crate::error::AuthResult;
use crate::presentation::hooks::{
    AttachCredential, ForceLogoutOnUnauthorized, InboundHook, OutboundHook, RequestContext,
    TagRequestId,
};

/// Hook pipeline around a transport
pub struct RequestGateway<T>
where
    T: Transport,
{
    transport: T,
    outbound: Vec<Box<dyn OutboundHook>>,
    inbound: Vec<Box<dyn InboundHook>>,
}

impl<T> RequestGateway<T>
where
    T: Transport + Sync,
{
    /// Bare gateway without hooks
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }

    /// Gateway with the standard hooks: request id, bearer credential, and
    /// forced logout on 401
    pub fn standard<C>(
        transport: T,
        store: Arc<C>,
        sessions: Arc<dyn SessionReset>,
        navigator: Arc<dyn Navigator>,
    ) -> Self
    where
        C: CredentialStore + 'static,
    {
        Self::new(transport)
            .with_outbound(TagRequestId)
            .with_outbound(AttachCredential::new(store))
            .with_inbound(ForceLogoutOnUnauthorized::new(sessions, navigator))
    }

    pub fn with_outbound(mut self, hook: impl OutboundHook + 'static) -> Self {
        self.outbound.push(Box::new(hook));
        self
    }

    pub fn with_inbound(mut self, hook: impl InboundHook + 'static) -> Self {
        self.inbound.push(Box::new(hook));
        self
    }

    /// Names of the installed hooks, outbound first
    pub fn hook_names(&self) -> Vec<&'static str> {
        self.outbound
            .iter()
            .map(|hook| hook.name())
            .chain(self.inbound.iter().map(|hook| hook.name()))
            .collect()
    }

    /// Send a request and map non-success statuses to errors
    pub async fn send(&self, request: ApiRequest) -> AuthResult<ApiResponse> {
        let mut request = request;
        let mut ctx = RequestContext::new();
        for hook in &self.outbound {
            hook.on_request(&mut request, &mut ctx)?;
        }

        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.transport.send(request).await.inspect_err(|e| e.log())?;

        for hook in &self.inbound {
            hook.on_response(&response, &ctx);
        }

        response.into_result().inspect_err(|e| {
            tracing::debug!(
                request_id = %ctx.request_id,
                method = %method,
                path = %path,
                status = e.status_code(),
                "Request failed"
            );
            e.log();
        })
    }

    /// Send a request and decode the JSON body
    pub async fn fetch<R>(&self, request: ApiRequest) -> AuthResult<R>
    where
        R: DeserializeOwned,
    {
        let response = self.send(request).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// `GET path` and decode the JSON body
    pub async fn get_json<R>(&self, path: &str) -> AuthResult<R>
    where
        R: DeserializeOwned,
    {
        self.fetch(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body and decode the JSON response
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> AuthResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.fetch(ApiRequest::post(path).with_json(body)?).await
    }
}
