/// Aero data file reader

use crate::error::{AeroError, Result};
use crate::format::constants::*;
use crate::format::tokenize;
use crate::io::token_reader::TokenReader;
use crate::model::{AerodataOptions, FlightModel};
use std::fs;
use std::path::Path;

/// Read a flight model data file from disk
pub fn read_dat<P: AsRef<Path>>(path: P) -> Result<FlightModel> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "loading flight model");
    parse_dat(content)
}

/// Parse a flight model from the complete document text
pub fn parse_dat<S: Into<String>>(content: S) -> Result<FlightModel> {
    let content = content.into();
    let mut fm = FlightModel::with_content(String::new());

    {
        let mut reader = TokenReader::new(tokenize(&content));
        seek_aero_section(&mut reader)?;
        read_basic_coefficients(&mut reader, &mut fm)?;
        if fm.aerodata_options.advanced_tef {
            read_advanced_tef(&mut reader, &mut fm)?;
        }
        tracing::debug!(
            end = reader.offset(),
            tokens = reader.len(),
            "aero data parsed"
        );
    }

    fm.original_content = content;
    Ok(fm)
}

/// Position the reader at the start of the aero section
///
/// The section offset is derived from the landing gear count, which sits at
/// a fixed token offset in the preceding part of the document.
fn seek_aero_section(reader: &mut TokenReader<'_>) -> Result<()> {
    reader.seek(GEAR_COUNT_OFFSET);
    reader.enter("landing gear count");
    let line = reader.line();
    let num_gears = reader.read_count()?;

    let offset = aero_section_offset(num_gears).ok_or_else(|| {
        AeroError::format(
            line,
            GEAR_COUNT_OFFSET,
            "landing gear count",
            format!("gear count {} too large", num_gears),
        )
    })?;
    tracing::debug!(num_gears, offset, "located aero section");
    reader.seek(offset);
    Ok(())
}

/// Consume leading `aeropt <value>` pairs
fn read_aerodata_options(reader: &mut TokenReader<'_>) -> Result<AerodataOptions> {
    reader.enter("aerodata options");
    let mut options = AerodataOptions::default();

    while reader.peek() == Some(AEROPT_KEYWORD) {
        reader.read_string()?;
        match reader.read_string()? {
            AEROPT_ADVANCED_TEF => options.advanced_tef = true,
            AEROPT_LEF_INCLUDED_IN_CL => options.lef_included_in_cl = true,
            other => tracing::warn!(option = other, "ignoring unknown aerodata option"),
        }
    }

    Ok(options)
}

fn read_basic_coefficients(reader: &mut TokenReader<'_>, fm: &mut FlightModel) -> Result<()> {
    fm.aerodata_options = read_aerodata_options(reader)?;

    reader.enter("Mach breakpoints");
    fm.mach_breakpoints = reader.read_array()?;

    reader.enter("alpha breakpoints");
    fm.alpha_breakpoints = reader.read_array()?;

    let rows = fm.mach_breakpoints.len();
    let cols = fm.alpha_breakpoints.len();

    reader.enter("CL table");
    (fm.cl_mul, fm.cl) = reader.read_table(rows, cols, true)?;

    reader.enter("CD table");
    (fm.cd_mul, fm.cd) = reader.read_table(rows, cols, true)?;

    reader.enter("CY table");
    (fm.cy_mul, fm.cy) = reader.read_table(rows, cols, true)?;

    Ok(())
}

fn read_advanced_tef(reader: &mut TokenReader<'_>, fm: &mut FlightModel) -> Result<()> {
    reader.enter("TEF Mach breakpoints");
    fm.tef_mach_breakpoints = reader.read_array()?;

    reader.enter("TEF alpha breakpoints");
    fm.tef_alpha_breakpoints = reader.read_array()?;

    let rows = fm.tef_mach_breakpoints.len();
    let cols = fm.tef_alpha_breakpoints.len();

    reader.enter("CL TEF table");
    fm.tef_cl = reader.read_table(rows, cols, false)?.1;

    reader.enter("CD TEF table");
    fm.tef_cd = reader.read_table(rows, cols, false)?.1;

    Ok(())
}
