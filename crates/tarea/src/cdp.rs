//! Chromium-backed driver over the Chrome DevTools Protocol.
//!
//! Available with the `browser` feature. Queries and actions compile the
//! [`Selector`] to a JavaScript expression evaluated in the page; the page
//! itself stays the source of truth for all state.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::driver::Driver;
use crate::result::{TareaError, TareaResult};
use crate::selector::Selector;
use crate::wait::{ElementState, WaitOptions};

/// Browser launch configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run without a visible window
    pub headless: bool,
    /// Path to a chromium binary (`None` = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers/CI)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// [`Driver`] implementation over one CDP page
pub struct CdpDriver {
    browser: Arc<Mutex<CdpBrowser>>,
    page: CdpPage,
    #[allow(dead_code)]
    handler: tokio::task::JoinHandle<()>,
}

impl std::fmt::Debug for CdpDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpDriver").finish_non_exhaustive()
    }
}

impl CdpDriver {
    /// Launch a browser and open a blank page
    ///
    /// # Errors
    ///
    /// `BrowserLaunchError` when the browser cannot be started.
    pub async fn launch(config: BrowserConfig) -> TareaResult<Self> {
        let mut builder = CdpConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder
            .build()
            .map_err(|e| TareaError::BrowserLaunchError { message: e })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| TareaError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| TareaError::PageError {
                message: e.to_string(),
            })?;

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            page,
            handler: handle,
        })
    }

    /// Close the browser
    pub async fn close(&self) -> TareaResult<()> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| TareaError::BrowserLaunchError {
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn eval(&self, script: &str) -> TareaResult<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| TareaError::EvalError {
                message: e.to_string(),
            })?;
        result
            .into_value::<serde_json::Value>()
            .map_err(|e| TareaError::EvalError {
                message: e.to_string(),
            })
    }

    /// Run `body` against the selector's first match; a `false` return from
    /// the page means the selector matched nothing
    async fn act(&self, selector: &Selector, body: &str) -> TareaResult<()> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return false; {body}; return true; }})()",
            selector.to_js_first()
        );
        match self.eval(&script).await? {
            serde_json::Value::Bool(true) => Ok(()),
            _ => Err(TareaError::ElementNotFound {
                selector: selector.to_string(),
            }),
        }
    }

    async fn query_first(&self, selector: &Selector, expr: &str) -> TareaResult<serde_json::Value> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return null; return {expr}; }})()",
            selector.to_js_first()
        );
        self.eval(&script).await
    }
}

#[async_trait]
impl Driver for CdpDriver {
    async fn goto(&self, url: &str) -> TareaResult<()> {
        debug!(url, "navigating");
        self.page
            .goto(url)
            .await
            .map_err(|e| TareaError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| TareaError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn reload(&self) -> TareaResult<()> {
        self.page.reload().await.map_err(|e| TareaError::PageError {
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn go_back(&self) -> TareaResult<()> {
        self.eval("history.back()").await?;
        Ok(())
    }

    async fn current_url(&self) -> TareaResult<String> {
        let url = self.page.url().await.map_err(|e| TareaError::PageError {
            message: e.to_string(),
        })?;
        Ok(url.unwrap_or_default())
    }

    async fn title(&self) -> TareaResult<String> {
        let title = self
            .page
            .get_title()
            .await
            .map_err(|e| TareaError::PageError {
                message: e.to_string(),
            })?;
        Ok(title.unwrap_or_default())
    }

    async fn count(&self, selector: &Selector) -> TareaResult<usize> {
        let value = self.eval(&selector.to_js_count()).await?;
        Ok(value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0))
    }

    async fn is_visible(&self, selector: &Selector) -> TareaResult<bool> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const s = getComputedStyle(el); \
             return s.display !== 'none' && s.visibility !== 'hidden' \
               && el.getClientRects().length > 0; }})()",
            selector.to_js_first()
        );
        Ok(self.eval(&script).await? == serde_json::Value::Bool(true))
    }

    async fn text_content(&self, selector: &Selector) -> TareaResult<Option<String>> {
        let value = self.query_first(selector, "el.textContent").await?;
        Ok(value.as_str().map(ToString::to_string))
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> TareaResult<Option<String>> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return {{ missing: true }}; \
             return {{ value: el.getAttribute({name:?}) }}; }})()",
            selector.to_js_first()
        );
        let value = self.eval(&script).await?;
        if value.get("missing").is_some() {
            return Err(TareaError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        Ok(value
            .get("value")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string))
    }

    async fn input_value(&self, selector: &Selector) -> TareaResult<String> {
        match self.query_first(selector, "el.value").await? {
            serde_json::Value::String(s) => Ok(s),
            serde_json::Value::Null => Err(TareaError::ElementNotFound {
                selector: selector.to_string(),
            }),
            other => Err(TareaError::InvalidState {
                message: format!("{selector} has no string value, got {other}"),
            }),
        }
    }

    async fn is_checked(&self, selector: &Selector) -> TareaResult<bool> {
        Ok(self.query_first(selector, "el.checked === true").await?
            == serde_json::Value::Bool(true))
    }

    async fn is_enabled(&self, selector: &Selector) -> TareaResult<bool> {
        Ok(self.query_first(selector, "el.disabled !== true").await?
            == serde_json::Value::Bool(true))
    }

    async fn click(&self, selector: &Selector) -> TareaResult<()> {
        self.act(selector, "el.click()").await
    }

    async fn double_click(&self, selector: &Selector) -> TareaResult<()> {
        self.act(
            selector,
            "el.dispatchEvent(new MouseEvent('dblclick', { bubbles: true }))",
        )
        .await
    }

    async fn hover(&self, selector: &Selector) -> TareaResult<()> {
        self.act(
            selector,
            "el.dispatchEvent(new MouseEvent('mouseover', { bubbles: true }))",
        )
        .await
    }

    async fn fill(&self, selector: &Selector, text: &str) -> TareaResult<()> {
        // React tracks input state through the native value setter; assigning
        // el.value directly would be swallowed by its change tracking
        let body = format!(
            "const proto = Object.getPrototypeOf(el); \
             const setter = Object.getOwnPropertyDescriptor(proto, 'value').set; \
             setter.call(el, {text:?}); \
             el.dispatchEvent(new Event('input', {{ bubbles: true }}))"
        );
        self.act(selector, &body).await
    }

    async fn press(&self, selector: &Selector, key: &str) -> TareaResult<()> {
        let body = format!(
            "el.dispatchEvent(new KeyboardEvent('keydown', {{ key: {key:?}, bubbles: true }})); \
             el.dispatchEvent(new KeyboardEvent('keyup', {{ key: {key:?}, bubbles: true }}))"
        );
        self.act(selector, &body).await
    }

    async fn set_checked(&self, selector: &Selector, checked: bool) -> TareaResult<()> {
        let body = format!("if (el.checked !== {checked}) el.click()");
        self.act(selector, &body).await
    }

    async fn focus(&self, selector: &Selector) -> TareaResult<()> {
        self.act(selector, "el.focus()").await
    }

    async fn blur(&self, selector: &Selector) -> TareaResult<()> {
        self.act(selector, "el.blur()").await
    }

    async fn wait_for_state(
        &self,
        selector: &Selector,
        state: ElementState,
        options: &WaitOptions,
    ) -> TareaResult<()> {
        let start = Instant::now();
        loop {
            let visible = self.is_visible(selector).await?;
            let matched = match state {
                ElementState::Visible => visible,
                ElementState::Hidden => !visible,
            };
            if matched {
                return Ok(());
            }
            if start.elapsed() >= options.timeout() {
                return Err(TareaError::Timeout {
                    ms: options.timeout_ms,
                });
            }
            tokio::time::sleep(options.poll_interval()).await;
        }
    }

    async fn evaluate(&self, script: &str) -> TareaResult<serde_json::Value> {
        self.eval(script).await
    }

    async fn storage_get(&self, key: &str) -> TareaResult<Option<String>> {
        let value = self
            .eval(&format!("window.localStorage.getItem({key:?})"))
            .await?;
        Ok(value.as_str().map(ToString::to_string))
    }

    async fn storage_set(&self, key: &str, value: &str) -> TareaResult<()> {
        self.eval(&format!(
            "window.localStorage.setItem({key:?}, {value:?})"
        ))
        .await?;
        Ok(())
    }

    async fn storage_remove(&self, key: &str) -> TareaResult<()> {
        self.eval(&format!("window.localStorage.removeItem({key:?})"))
            .await?;
        Ok(())
    }
}
