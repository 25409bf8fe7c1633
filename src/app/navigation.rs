use std::sync::mpsc::{self, Receiver, Sender};

use super::View;

/// View a navigation request opens when it names none
pub const DEFAULT_TARGET: View = View::CreateForm;

/// Handle for requesting a view change from anywhere below the controller.
///
/// Requests queue up until the controller drains them with
/// [`super::AppController::pump_navigation`].
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: Sender<Option<View>>,
}

impl Navigator {
    /// Ask for `view`, or for [`DEFAULT_TARGET`] when `None`.
    ///
    /// Returns `false` if the controller is gone.
    pub fn request(&self, view: Option<View>) -> bool {
        self.tx.send(view).is_ok()
    }

    pub fn go(&self, view: View) -> bool {
        self.request(Some(view))
    }
}

pub(crate) fn channel() -> (Navigator, Receiver<Option<View>>) {
    let (tx, rx) = mpsc::channel();
    (Navigator { tx }, rx)
}

/// Resolve a request payload to the view it opens
pub fn resolve(request: Option<View>) -> View {
    request.unwrap_or(DEFAULT_TARGET)
}
