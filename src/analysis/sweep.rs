//! Parametric sweeps.
//!
//! A sweep re-solves the active setup over a range of one declared variable,
//! or over an externally supplied variation table (one row per combination).
//! Before handing a table file to the backend it is parsed and every header
//! variable is checked against the session's variable table, so a typo fails
//! here instead of deep inside the solver.
//!
//! # Table format
//!
//! ```text
//! id,$h,$freq
//! 1,0.5mm,1MHz
//! 2,1mm,1MHz
//! ```
//!
//! The first column is a row identifier; every further column names a
//! declared variable with a `$` prefix. Cells are `value[unit]`.

use std::path::PathBuf;

use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::space0;
use nom::combinator::opt;
use nom::multi::many1;
use nom::number::complete::double;
use nom::IResult;
use nom::Parser;

use super::{Analysis, Outcome, RunOptions};
use crate::backend::{Backend, ParametricSweep};
use crate::error::{CoilforgeError, Result};
use crate::model::SweepStepType;

/// Where the sweep points come from.
#[derive(Debug, Clone)]
pub enum SweepSource {
    /// Range over a single declared variable.
    Range {
        variable: String,
        start: f64,
        end: f64,
        step: f64,
        step_type: SweepStepType,
    },
    /// Variation table file, one row per sweep point.
    Table(PathBuf),
}

/// Parametric sweep request.
#[derive(Debug, Clone)]
pub struct SweepSetup {
    pub source: SweepSource,
    /// Persist field data at every sweep point.
    pub save_fields: bool,
    pub name: String,
}

impl SweepSetup {
    pub fn range(variable: &str, start: f64, end: f64, step: f64, step_type: SweepStepType) -> Self {
        Self {
            source: SweepSource::Range {
                variable: variable.to_string(),
                start,
                end,
                step,
                step_type,
            },
            save_fields: false,
            name: "sweep".to_string(),
        }
    }

    pub fn from_table(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SweepSource::Table(path.into()),
            save_fields: false,
            name: "sweep".to_string(),
        }
    }
}

/// Parsed shape of a variation table: the variables its columns drive and
/// the number of data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepTable {
    pub variables: Vec<String>,
    pub rows: usize,
}

/// Parse a variation table. Validates structure only; the file itself is
/// handed to the backend unmodified.
pub fn parse_sweep_table(input: &str) -> Result<SweepTable> {
    let mut lines = input.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (header_num, header) = lines
        .next()
        .ok_or_else(|| CoilforgeError::Parse("variation table is empty".to_string()))?;
    let variables =
        parse_header(header.trim()).map_err(|e| parse_err(header_num, header, &e))?;

    let mut rows = 0;
    for (line_num, line) in lines {
        let cells = parse_row(line.trim()).map_err(|e| parse_err(line_num, line, &e))?;
        if cells != variables.len() {
            return Err(parse_err(
                line_num,
                line,
                &format!("expected {} value cells, found {}", variables.len(), cells),
            ));
        }
        rows += 1;
    }
    if rows == 0 {
        return Err(CoilforgeError::Parse(
            "variation table has a header but no data rows".to_string(),
        ));
    }

    Ok(SweepTable { variables, rows })
}

fn parse_err(line_num: usize, raw_line: &str, detail: &str) -> CoilforgeError {
    CoilforgeError::Parse(format!("line {}: {} in: {}", line_num + 1, detail, raw_line))
}

/// Parse the header row: `id,$v1,$v2,…`. Returns the variable names without
/// their `$` prefix.
fn parse_header(line: &str) -> std::result::Result<Vec<String>, String> {
    let (rest, (_, columns)) = (identifier, many1(header_column))
        .parse(line)
        .map_err(|_| "malformed header (expected id,$var,…)".to_string())?;
    if !rest.trim().is_empty() {
        return Err(format!("trailing input after header: '{}'", rest));
    }
    Ok(columns.into_iter().map(|c| c.to_string()).collect())
}

/// Count the value cells of a data row: `id,value[unit],…`.
fn parse_row(line: &str) -> std::result::Result<usize, String> {
    let (rest, (_, cells)) = (identifier, many1(value_cell))
        .parse(line)
        .map_err(|_| "malformed data row (expected id,value[unit],…)".to_string())?;
    if !rest.trim().is_empty() {
        return Err(format!("trailing input after row: '{}'", rest));
    }
    Ok(cells.len())
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// One `,$name` header column.
fn header_column(input: &str) -> IResult<&str, &str> {
    let (rest, (_, _, _, _, name)) =
        (space0, tag(","), space0, tag("$"), identifier).parse(input)?;
    Ok((rest, name))
}

/// One `,value[unit]` data cell.
fn value_cell(input: &str) -> IResult<&str, f64> {
    let (rest, (_, _, _, value, _)) = (
        space0,
        tag(","),
        space0,
        double,
        opt(take_while1(|c: char| c.is_alphabetic() || c == '%')),
    )
        .parse(input)?;
    Ok((rest, value))
}

impl<B: Backend> Analysis<'_, B> {
    /// Configure a parametric sweep and run the save/stop/solve tail. The
    /// sweep attaches to the most recently created setup.
    pub fn parametric_sweep(
        &mut self,
        setup: &SweepSetup,
        options: &RunOptions,
    ) -> Result<Outcome> {
        let solution = self
            .setup_names()
            .last()
            .cloned()
            .ok_or_else(|| {
                CoilforgeError::Precondition(
                    "a sweep requires at least one analysis setup".to_string(),
                )
            })?;

        match &setup.source {
            SweepSource::Range { variable, step, .. } => {
                if *step <= 0.0 {
                    return Err(CoilforgeError::Precondition(
                        "sweep step must be greater than 0".to_string(),
                    ));
                }
                if !self.session().variables().contains(variable) {
                    return Err(CoilforgeError::NotFound(format!(
                        "variable '{}' is not declared, cannot sweep over it",
                        variable
                    )));
                }
            }
            SweepSource::Table(path) => {
                let content = std::fs::read_to_string(path)?;
                let table = parse_sweep_table(&content)?;
                for variable in &table.variables {
                    if !self.session().variables().contains(variable) {
                        return Err(CoilforgeError::NotFound(format!(
                            "variation table references undeclared variable '{}'",
                            variable
                        )));
                    }
                }
                tracing::info!(
                    rows = table.rows,
                    variables = ?table.variables,
                    "variation table validated"
                );
            }
        }

        // Bind the first specimen to the axis placeholders so table rows (and
        // range sweeps over an axis) move it per sweep point.
        let specimen = self.session().registry().specimens().next().map(String::from);
        if let Some(specimen) = specimen {
            self.session()
                .backend_mut()
                .move_object(&specimen, ["$x", "$y", "$z"])?;
        }

        tracing::info!(sweep = %setup.name, solution = %solution, "configuring parametric sweep");
        match &setup.source {
            SweepSource::Range { variable, start, end, step, step_type } => {
                self.session().backend_mut().add_parametric_sweep(&ParametricSweep {
                    variable: format!("${}", variable),
                    start: *start,
                    end: *end,
                    step: *step,
                    step_type: *step_type,
                    solution,
                    name: setup.name.clone(),
                    save_fields: setup.save_fields,
                })?;
            }
            SweepSource::Table(path) => {
                self.session().backend_mut().add_parametric_from_file(
                    path,
                    &setup.name,
                    setup.save_fields,
                )?;
            }
        }

        // Sweep points are always solved unless the caller stops the build.
        self.run_tail(options, false)
    }
}
