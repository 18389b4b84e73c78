use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const RFKILL_SYSFS: &str = "/sys/class/rfkill";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Unblocked,
    SoftBlocked,
    HardBlocked,
}

/// Block state of the wlan radios, read from sysfs. Each switch is a
/// directory under /sys/class/rfkill with `type`, `soft` and `hard`
/// attributes.
pub fn wlan_block_state() -> Result<BlockState> {
    let entries = fs::read_dir(RFKILL_SYSFS).context("Cannot read /sys/class/rfkill")?;
    let mut state = BlockState::Unblocked;

    for entry in entries.flatten() {
        let path = entry.path();
        if read_attribute(&path, "type").as_deref() != Some("wlan") {
            continue;
        }

        let soft = read_attribute(&path, "soft");
        let hard = read_attribute(&path, "hard");
        state = merge(state, switch_state(soft.as_deref(), hard.as_deref()));
    }

    Ok(state)
}

fn read_attribute(switch_dir: &Path, attribute: &str) -> Option<String> {
    fs::read_to_string(switch_dir.join(attribute))
        .ok()
        .map(|s| s.trim().to_string())
}

fn switch_state(soft: Option<&str>, hard: Option<&str>) -> BlockState {
    if hard == Some("1") {
        BlockState::HardBlocked
    } else if soft == Some("1") {
        BlockState::SoftBlocked
    } else {
        BlockState::Unblocked
    }
}

/// Hard block wins over soft block, any block wins over none
fn merge(a: BlockState, b: BlockState) -> BlockState {
    match (a, b) {
        (BlockState::HardBlocked, _) | (_, BlockState::HardBlocked) => BlockState::HardBlocked,
        (BlockState::SoftBlocked, _) | (_, BlockState::SoftBlocked) => BlockState::SoftBlocked,
        _ => BlockState::Unblocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_state_from_sysfs_values() {
        assert_eq!(switch_state(Some("0"), Some("0")), BlockState::Unblocked);
        assert_eq!(switch_state(Some("1"), Some("0")), BlockState::SoftBlocked);
        assert_eq!(switch_state(Some("0"), Some("1")), BlockState::HardBlocked);
        // Hard block wins even when both are set
        assert_eq!(switch_state(Some("1"), Some("1")), BlockState::HardBlocked);
        // Missing attributes read as unblocked
        assert_eq!(switch_state(None, None), BlockState::Unblocked);
    }

    #[test]
    fn merge_keeps_the_strongest_block() {
        assert_eq!(
            merge(BlockState::Unblocked, BlockState::SoftBlocked),
            BlockState::SoftBlocked
        );
        assert_eq!(
            merge(BlockState::SoftBlocked, BlockState::HardBlocked),
            BlockState::HardBlocked
        );
        assert_eq!(
            merge(BlockState::Unblocked, BlockState::Unblocked),
            BlockState::Unblocked
        );
    }
}
