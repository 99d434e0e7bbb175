use super::table::{ljust, write_header, write_row, write_underline};
use crate::catalog::SeasonType;
use crate::stats::{SeasonLedger, Stat, StatLine};
use serde::Serialize;
use std::io::{self, Write};
use std::marker::PhantomData;

/// Year-by-year stats of one player with career totals and averages
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
pub struct CareerReport<S: Stat> {
    pub player_id: String,
    pub name: String,
    pub season: SeasonType,
    pub seasons: SeasonLedger<S::Line>,
    pub active_years: u32,
    pub average: Option<S::Line>,
    #[serde(skip)]
    stat: PhantomData<S>,
}

impl<S: Stat> CareerReport<S> {
    pub fn new(player_id: &str, name: &str, season: SeasonType, seasons: SeasonLedger<S::Line>) -> Self {
        Self {
            player_id: player_id.to_string(),
            name: name.to_string(),
            season,
            active_years: seasons.active_years(),
            average: seasons.average(),
            seasons,
            stat: PhantomData,
        }
    }

    fn cells(line: &S::Line, rates: bool) -> Vec<String> {
        S::all()
            .iter()
            .map(|stat| {
                if stat.is_rate() && (!rates || line.games() == 0) {
                    String::new()
                } else {
                    stat.display(line)
                }
            })
            .collect()
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let width = S::WIDTH;
        let labels = || S::all().iter().map(|stat| stat.label());

        writeln!(out, "\t{} {} {} Stats:", self.name, self.season, S::KIND)?;
        writeln!(out)?;
        write_header(out, labels(), width)?;

        let rows = self.seasons.seasons();
        for row in rows {
            write_row(out, &row.year.to_string(), Self::cells(&row.line, true), width)?;
        }
        if rows.len() <= 1 {
            return Ok(());
        }

        write_underline(out, S::all().len(), width)?;
        if rows.len() > 5 {
            write_row(out, "", labels(), width)?;
        }
        write_row(out, "Total", Self::cells(self.seasons.total(), true), width)?;
        if let Some(average) = &self.average {
            write_row(out, "Ave", Self::cells(average, false), width)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{}printed Average of each counting stat for {} ACTIVE years",
            ljust("", width),
            self.active_years
        )
    }
}
