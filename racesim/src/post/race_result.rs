use std::fmt::Write;

use serde::Serialize;

/// ClassifiedDriver is one row of the final classification of a race.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ClassifiedDriver {
    pub position: usize,
    pub driver: String,
    pub team: String,
    pub points: u32,
}

/// RaceResult contains all race information that is required for post-processing the results.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RaceResult {
    pub race_no: u32,
    pub no_ticks: u32,
    pub classification: Vec<ClassifiedDriver>,
}

impl RaceResult {
    /// podium returns up to three drivers on the podium.
    pub fn podium(&self) -> &[ClassifiedDriver] {
        &self.classification[..self.classification.len().min(3)]
    }

    /// format_classification returns the classification as a text table.
    pub fn format_classification(&self) -> Result<String, std::fmt::Error> {
        let mut content = String::new();
        writeln!(
            &mut content,
            "RESULT: Race {} ({} ticks)",
            self.race_no, self.no_ticks
        )?;
        writeln!(&mut content, "pos, driver, team, points")?;

        for row in self.classification.iter() {
            writeln!(
                &mut content,
                "P{:<2}, {:>4}, {:<14}, {:>2} pts",
                row.position, row.driver, row.team, row.points
            )?;
        }

        Ok(content)
    }

    /// print_classification prints the classification to the console output.
    pub fn print_classification(&self) {
        match self.format_classification() {
            Ok(content) => print!("{}", content),
            Err(e) => eprintln!("WARNING: Could not format race result: {}", e),
        }
    }
}
