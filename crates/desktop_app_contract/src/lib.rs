//! Shared contract types between the desktop window manager and the apps it hosts.
//!
//! The window manager never looks inside an app. It only knows how to mount one through an
//! [`AppFactory`], render the resulting [`AppContent`], and tear it down once when the owning
//! window closes. Apps talk back through an [`AppHost`], whose commands are queued and applied by
//! the manager after its current operation finishes.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{cell::RefCell, collections::VecDeque, fmt, rc::Rc};

use leptos::View;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Stable identifier for a manager-owned window, as seen by apps.
pub type WindowRuntimeId = u64;

const MAX_APP_ID_LEN: usize = 64;

/// Stable identifier for a registered application (`notepad`, `calculator`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Returns an app identifier when `raw` is a lowercase token of letters, digits, `-` or `.`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAppId`] when `raw` is empty, too long, or contains other characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidAppId> {
        let raw = raw.into();
        if is_valid_app_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(InvalidAppId(raw))
        }
    }

    /// Creates an id without validation for trusted compile-time constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned by [`AppId::new`] for malformed identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid application id `{0}`; expected a lowercase token")]
pub struct InvalidAppId(pub String);

fn is_valid_app_id(raw: &str) -> bool {
    let Some(first) = raw.bytes().next() else {
        return false;
    };
    raw.len() <= MAX_APP_ID_LEN
        && first.is_ascii_lowercase()
        && !raw.ends_with(['-', '.'])
        && raw
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
}

/// Requests an app may send to the window manager that hosts it.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Close the window hosting the app.
    CloseWindow,
    /// Open (or focus) another application.
    OpenApp {
        /// Application to open.
        app_id: AppId,
        /// App-defined launch parameters forwarded to the new window.
        launch_params: Value,
        /// Create a new window even when one for `app_id` is already open.
        force_new_instance: bool,
    },
    /// Replace the hosting window's title.
    SetTitle {
        /// New window title.
        title: String,
    },
    /// Show a transient notification.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body text.
        body: String,
    },
}

type QueueWaker = Rc<dyn Fn()>;

#[derive(Default)]
struct QueueInner {
    commands: RefCell<VecDeque<(WindowRuntimeId, AppCommand)>>,
    waker: RefCell<Option<QueueWaker>>,
}

/// Shared FIFO of app commands waiting for the manager to apply them.
#[derive(Clone, Default)]
pub struct AppCommandQueue {
    inner: Rc<QueueInner>,
}

impl fmt::Debug for AppCommandQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCommandQueue")
            .field("commands", &self.inner.commands.borrow())
            .field("has_waker", &self.inner.waker.borrow().is_some())
            .finish()
    }
}

impl AppCommandQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a host handle that tags every command with `window_id`.
    pub fn host_for(&self, window_id: WindowRuntimeId) -> AppHost {
        AppHost {
            window_id,
            queue: self.clone(),
        }
    }

    /// Installs a callback invoked after every push, replacing any previous one.
    ///
    /// The callback runs synchronously inside [`AppHost::send`], possibly while the manager is
    /// mid-operation, so it should only schedule the drain.
    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.inner.waker.borrow_mut() = Some(Rc::new(waker));
    }

    /// Removes and returns the oldest queued command.
    pub fn pop(&self) -> Option<(WindowRuntimeId, AppCommand)> {
        self.inner.commands.borrow_mut().pop_front()
    }

    /// Returns the number of queued commands.
    pub fn len(&self) -> usize {
        self.inner.commands.borrow().len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.commands.borrow().is_empty()
    }

    /// Drops queued commands that only make sense while `window_id` is still open.
    pub fn discard_from(&self, window_id: WindowRuntimeId) {
        self.inner.commands.borrow_mut().retain(|(source, command)| {
            *source != window_id || !matches!(command, AppCommand::SetTitle { .. })
        });
    }

    fn push(&self, window_id: WindowRuntimeId, command: AppCommand) {
        self.inner
            .commands
            .borrow_mut()
            .push_back((window_id, command));
        let waker = self.inner.waker.borrow().clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

/// Window-scoped handle apps use to send [`AppCommand`] values to the manager.
#[derive(Debug, Clone)]
pub struct AppHost {
    window_id: WindowRuntimeId,
    queue: AppCommandQueue,
}

impl AppHost {
    /// Returns the id of the window hosting the app.
    pub fn window_id(&self) -> WindowRuntimeId {
        self.window_id
    }

    /// Queues a command for the manager.
    pub fn send(&self, command: AppCommand) {
        self.queue.push(self.window_id, command);
    }

    /// Asks the manager to close the hosting window.
    pub fn close(&self) {
        self.send(AppCommand::CloseWindow);
    }

    /// Asks the manager to retitle the hosting window.
    pub fn set_title(&self, title: impl Into<String>) {
        self.send(AppCommand::SetTitle {
            title: title.into(),
        });
    }

    /// Asks the manager to open or focus `app_id`.
    pub fn open_app(&self, app_id: AppId, launch_params: Value) {
        self.send(AppCommand::OpenApp {
            app_id,
            launch_params,
            force_new_instance: false,
        });
    }

    /// Asks the manager to show a notification.
    pub fn notify(&self, title: impl Into<String>, body: impl Into<String>) {
        self.send(AppCommand::Notify {
            title: title.into(),
            body: body.into(),
        });
    }
}

/// Context passed to [`AppFactory::mount`] for one window.
#[derive(Debug, Clone)]
pub struct AppMountContext {
    /// Window hosting the app.
    pub window_id: WindowRuntimeId,
    /// Application being mounted.
    pub app_id: AppId,
    /// App-defined launch parameters.
    pub launch_params: Value,
    /// Command channel back to the manager.
    pub host: AppHost,
}

/// Error returned by an [`AppFactory`] that cannot produce content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppMountError {
    /// The launch parameters were not understood by the app.
    #[error("invalid launch parameters: {0}")]
    InvalidLaunchParams(String),
    /// Any other app-reported failure.
    #[error("{0}")]
    Failed(String),
}

/// A live app instance mounted into a window's content area.
pub trait AppContent {
    /// Renders the app's view into the hosting window.
    fn render(&self) -> View;

    /// Releases app resources. Called exactly once, when the hosting window closes.
    fn teardown(&mut self) {}
}

/// Capability that turns a mount context into live [`AppContent`].
pub trait AppFactory {
    /// Mounts a new app instance.
    ///
    /// # Errors
    ///
    /// Returns [`AppMountError`] when the app cannot start; the manager shows a fallback surface.
    fn mount(&self, context: AppMountContext) -> Result<Box<dyn AppContent>, AppMountError>;
}

impl<F> AppFactory for F
where
    F: Fn(AppMountContext) -> Result<Box<dyn AppContent>, AppMountError>,
{
    fn mount(&self, context: AppMountContext) -> Result<Box<dyn AppContent>, AppMountError> {
        self(context)
    }
}
