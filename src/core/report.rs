use std::fmt::{self, Write};

use crate::models::{MatchResult, ScoreTable};

/// One line per seeker describing its best provider
pub fn render_matches(matches: &MatchResult) -> String {
    let mut out = String::new();
    write_matches(&mut out, matches).expect("writing to String");
    out
}

/// Compatibility matrix with providers as rows and seekers as columns
pub fn render_matrix(table: &ScoreTable) -> String {
    let mut out = String::new();
    write_matrix(&mut out, table).expect("writing to String");
    out
}

fn write_matches(out: &mut impl Write, matches: &MatchResult) -> fmt::Result {
    for m in matches.iter() {
        match &m.best {
            Some(best) => writeln!(
                out,
                "{} is matched with {} (Score: {})",
                m.seeker_name, best.provider_name, best.score
            )?,
            None => writeln!(out, "{} has no match", m.seeker_name)?,
        }
    }
    Ok(())
}

fn write_matrix(out: &mut impl Write, table: &ScoreTable) -> fmt::Result {
    let label_width = table
        .providers
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .seekers
        .iter()
        .map(|s| s.chars().count().max(1))
        .collect();

    write!(out, "{:label_width$}", "")?;
    for (seeker, width) in table.seekers.iter().zip(widths.iter().copied()) {
        write!(out, "  {seeker:>width$}")?;
    }
    writeln!(out)?;

    for (provider, cells) in table.rows() {
        write!(out, "{provider:<label_width$}")?;
        for (cell, width) in cells.iter().zip(widths.iter().copied()) {
            write!(out, "  {:>width$}", cell.score)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
