//! Status command for showing the database location and what it holds.

use std::io::Write;

use anyhow::Result;

use hv_db::Database;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, db: &Database, config: &Config) -> Result<()> {
    let counts = db.counts()?;

    writeln!(writer, "Experience report status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;

    if counts.people == 0 {
        writeln!(writer, "No people imported.")?;
        return Ok(());
    }

    writeln!(writer, "People: {}", counts.people)?;
    writeln!(writer, "Experience records: {}", counts.records)?;

    Ok(())
}
