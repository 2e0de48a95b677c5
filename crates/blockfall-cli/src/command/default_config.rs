use blockfall_engine::GameConfig;

use crate::util;

pub(crate) fn run() -> anyhow::Result<()> {
    util::print_json(&GameConfig::default())
}
