//! Fixed-width text reports and their JSON form

mod boxscore;
mod career;
mod leaders;
mod table;

pub use boxscore::GameSummary;
pub use career::CareerReport;

use crate::error::RetroResult;
use serde::Serialize;
use std::io::Write;

/// Pretty-printed JSON followed by a newline
pub fn write_json<T: Serialize, W: Write>(value: &T, out: &mut W) -> RetroResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeasonType;
    use crate::leaders::Leaderboard;

    #[test]
    fn test_write_json() {
        let board = Leaderboard {
            stat: "SO".to_string(),
            season: SeasonType::Regular,
            start: 2014,
            end: 2014,
            limit: 30,
            qualifier: None,
            entries: Vec::new(),
        };
        let mut out = Vec::new();
        write_json(&board, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["stat"], "SO");
        assert_eq!(value["limit"], 30);
    }
}
