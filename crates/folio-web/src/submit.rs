use std::cell::{
  Cell,
  RefCell
};
use std::future::Future;
use std::rc::Rc;

use folio_core::config::ContactConfig;
use folio_core::submit::{
  ContactMessage,
  SubmitError,
  Submitter
};
use gloo::timers::callback::Timeout;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
  AbortController,
  Request,
  RequestInit,
  Response
};

/// Pretends to send after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
  delay_ms: u32
}

impl SimulatedSubmitter {
  pub fn new(delay_ms: u32) -> Self {
    Self {
      delay_ms
    }
  }
}

impl Submitter for SimulatedSubmitter {
  fn submit(
    &self,
    message: ContactMessage
  ) -> impl Future<
    Output = Result<(), SubmitError>
  > {
    let delay_ms = self.delay_ms;
    async move {
      tracing::debug!(
        delay_ms,
        email = %message.email,
        "simulating contact submission"
      );
      TimeoutFuture::new(delay_ms).await;
      Ok(())
    }
  }
}

/// Posts the message as JSON with
/// `fetch`.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
  endpoint:   String,
  method:     String,
  timeout_ms: u32,
  inflight:   Rc<RefCell<Option<AbortController>>>
}

impl HttpSubmitter {
  pub fn new(
    endpoint: String,
    method: String,
    timeout_ms: u32
  ) -> Self {
    Self {
      endpoint,
      method,
      timeout_ms,
      inflight: Rc::new(RefCell::new(None))
    }
  }

  /// Aborts the in-flight request, if any.
  pub fn abort(&self) {
    let controller = self.inflight.borrow_mut().take();
    if let Some(controller) = controller {
      tracing::info!(
        endpoint = %self.endpoint,
        "aborting contact request"
      );
      controller.abort();
    }
  }

  async fn send(
    &self,
    message: ContactMessage
  ) -> Result<(), SubmitError> {
    let body = message.to_json()?;
    let window = web_sys::window().ok_or_else(|| {
      SubmitError::Network("no window".to_string())
    })?;
    let controller =
      AbortController::new().map_err(network)?;

    let init = RequestInit::new();
    init.set_method(&self.method);
    init.set_body(&JsValue::from_str(&body));
    init.set_signal(Some(&controller.signal()));
    let request = Request::new_with_str_and_init(
      &self.endpoint,
      &init
    )
    .map_err(network)?;
    request
      .headers()
      .set("Content-Type", "application/json")
      .map_err(network)?;

    let timed_out = Rc::new(Cell::new(false));
    let _deadline = {
      let controller = controller.clone();
      let timed_out = timed_out.clone();
      Timeout::new(self.timeout_ms, move || {
        timed_out.set(true);
        controller.abort();
      })
    };
    *self.inflight.borrow_mut() = Some(controller.clone());

    let outcome =
      JsFuture::from(window.fetch_with_request(&request))
        .await;
    self.inflight.borrow_mut().take();

    let response = match outcome {
      | Ok(value) => {
        value.dyn_into::<Response>().map_err(network)?
      }
      | Err(_) if timed_out.get() => {
        return Err(SubmitError::Timeout {
          timeout_ms: self.timeout_ms
        });
      }
      | Err(_) if controller.signal().aborted() => {
        return Err(SubmitError::Cancelled);
      }
      | Err(error) => return Err(network(error))
    };

    if response.ok() {
      Ok(())
    } else {
      Err(SubmitError::Rejected {
        status: response.status()
      })
    }
  }
}

fn network(error: JsValue) -> SubmitError {
  SubmitError::Network(
    error
      .as_string()
      .unwrap_or_else(|| format!("{error:?}"))
  )
}

impl Submitter for HttpSubmitter {
  fn submit(
    &self,
    message: ContactMessage
  ) -> impl Future<
    Output = Result<(), SubmitError>
  > {
    let this = self.clone();
    async move {
      tracing::debug!(
        endpoint = %this.endpoint,
        method = %this.method,
        "sending contact request"
      );
      this.send(message).await
    }
  }
}

/// The submitter a page actually uses,
/// chosen from config.
#[derive(Debug, Clone)]
pub enum ContactSubmitter {
  Simulated(SimulatedSubmitter),
  Http(HttpSubmitter)
}

impl ContactSubmitter {
  pub fn from_config(cfg: &ContactConfig) -> Self {
    match &cfg.endpoint {
      | Some(endpoint) if !endpoint.trim().is_empty() => {
        ContactSubmitter::Http(HttpSubmitter::new(
          endpoint.trim().to_string(),
          cfg.method.clone(),
          cfg.timeout_ms
        ))
      }
      | _ => ContactSubmitter::Simulated(
        SimulatedSubmitter::new(cfg.simulated_delay_ms)
      )
    }
  }

  pub fn abort(&self) {
    if let ContactSubmitter::Http(http) = self {
      http.abort();
    }
  }
}

impl Submitter for ContactSubmitter {
  fn submit(
    &self,
    message: ContactMessage
  ) -> impl Future<
    Output = Result<(), SubmitError>
  > {
    let this = self.clone();
    async move {
      match this {
        | ContactSubmitter::Simulated(inner) => {
          inner.submit(message).await
        }
        | ContactSubmitter::Http(inner) => {
          inner.submit(message).await
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn endpoint_selects_http_submitter() {
    let cfg = ContactConfig {
      endpoint: Some(
        " https://example.com/contact "
          .to_string()
      ),
      timeout_ms: 4_000,
      ..ContactConfig::default()
    };
    match ContactSubmitter::from_config(&cfg) {
      | ContactSubmitter::Http(http) => {
        assert_eq!(
          http.endpoint,
          "https://example.com/contact"
        );
        assert_eq!(http.method, "POST");
        assert_eq!(http.timeout_ms, 4_000);
      }
      | other => {
        panic!("expected http, got {other:?}")
      }
    }
  }

  #[test]
  fn blank_endpoint_falls_back_to_simulation()
  {
    let cfg = ContactConfig {
      endpoint: Some("   ".to_string()),
      ..ContactConfig::default()
    };
    match ContactSubmitter::from_config(&cfg) {
      | ContactSubmitter::Simulated(sim) => {
        assert_eq!(sim.delay_ms, 2_000);
      }
      | other => {
        panic!(
          "expected simulation, got {other:?}"
        )
      }
    }
  }
}
