pub mod hidden;
pub mod psk;

use crate::mode::station::auth::{hidden::HiddenSsidDialog, psk::PskDialog};

/// The credential dialogs, one instance each, owned by the app
#[derive(Debug, Default)]
pub struct Auth {
    pub psk: PskDialog,
    pub hidden: HiddenSsidDialog,
}
