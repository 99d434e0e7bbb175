use super::table::{ljust, rjust, truncate};
use crate::leaders::Leaderboard;
use std::io::{self, Write};

impl Leaderboard {
    fn years(&self) -> String {
        if self.start == self.end {
            self.start.to_string()
        } else {
            format!("{}-{}", self.start, self.end)
        }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "\t{} {} Leaders for {} (Top {})",
            self.season,
            self.stat,
            self.years(),
            self.limit
        )?;
        match &self.qualifier {
            Some((label, min)) => writeln!(out, " min {} {}:", min, label)?,
            None => writeln!(out, ":")?,
        }
        writeln!(out)?;

        let value_label = rjust(&self.stat, 8);
        let qualifier_label = self
            .qualifier
            .as_ref()
            .map(|(label, _)| rjust(label, 8))
            .unwrap_or_default();
        let header = format!(
            "{}  {}{}{}{}",
            rjust("#", 4),
            ljust("Player", 10),
            ljust("Name", 24),
            value_label,
            qualifier_label
        );
        writeln!(out, "{}", header.trim_end())?;

        if self.entries.is_empty() {
            return writeln!(out, "      (no qualified players)");
        }
        for entry in &self.entries {
            let line = format!(
                "{}  {}{}{}{}",
                rjust(&entry.rank.to_string(), 4),
                ljust(&entry.player_id, 10),
                ljust(&truncate(&entry.name, 23), 24),
                rjust(&entry.display, 8),
                rjust(entry.qualifier.as_deref().unwrap_or(""), 8)
            );
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::SeasonType;
    use crate::leaders::{LeaderEntry, Leaderboard};

    fn entry(rank: usize, id: &str, name: &str, display: &str, qualifier: Option<&str>) -> LeaderEntry {
        LeaderEntry {
            rank,
            player_id: id.to_string(),
            name: name.to_string(),
            value: 0.0,
            display: display.to_string(),
            qualifier: qualifier.map(str::to_string),
        }
    }

    fn render(board: &Leaderboard) -> String {
        let mut out = Vec::new();
        board.write_text(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_counting_board() {
        let board = Leaderboard {
            stat: "HR".to_string(),
            season: SeasonType::Regular,
            start: 1954,
            end: 1955,
            limit: 10,
            qualifier: None,
            entries: vec![
                entry(1, "maysw101", "Willie Mays", "92", None),
                entry(2, "snidd101", "Duke Snider", "82", None),
                entry(2, "klust101", "Ted Kluszewski", "82", None),
            ],
        };
        let text = render(&board);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "\tRegular Season HR Leaders for 1954-1955 (Top 10):");
        assert_eq!(lines[2], "   #  Player    Name                          HR");
        assert_eq!(lines[3], "   1  maysw101  Willie Mays                   92");
        assert!(lines[5].starts_with("   2  klust101"));
    }

    #[test]
    fn test_rate_board_shows_qualifier() {
        let board = Leaderboard {
            stat: "ERA".to_string(),
            season: SeasonType::Post,
            start: 2014,
            end: 2014,
            limit: 10,
            qualifier: Some(("IP".to_string(), "5.0".to_string())),
            entries: vec![entry(1, "bumgm001", "Madison Bumgarner", "1.03", Some("52.2"))],
        };
        let text = render(&board);

        assert!(text.starts_with("\tPost Season ERA Leaders for 2014 (Top 10) min 5.0 IP:\n"));
        assert!(text.contains("     ERA      IP\n"));
        assert!(text.contains("Madison Bumgarner           1.03    52.2\n"));
    }

    #[test]
    fn test_empty_board() {
        let board = Leaderboard {
            stat: "BA".to_string(),
            season: SeasonType::Post,
            start: 1871,
            end: 1871,
            limit: 30,
            qualifier: Some(("PA".to_string(), "20".to_string())),
            entries: Vec::new(),
        };
        assert!(render(&board).contains("(no qualified players)"));
    }
}
