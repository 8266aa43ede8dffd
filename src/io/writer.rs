/// Aero data file writer

use crate::error::{AeroError, Result};
use crate::format::constants::*;
use crate::format::{format_unpadded, format_value};
use crate::model::{Coefficient, FlightModel, Table};
use std::fs;
use std::path::Path;

/// Write a flight model data file to disk, replacing any existing file
pub fn write_dat<P: AsRef<Path>>(fm: &FlightModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = write_dat_string(fm)?;
    fs::write(path, &content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "saved flight model");
    Ok(())
}

/// Render the complete document
///
/// Text before the line naming the aero section and after the line holding
/// the end marker is copied from the original document; the aero section in
/// between is regenerated.
pub fn write_dat_string(fm: &FlightModel) -> Result<String> {
    fm.check_shapes()?;
    let (header, footer) = split_original(fm.original_content())?;

    let mut text = String::with_capacity(fm.original_content().len());
    text.push_str(header);
    write_aero_section(&mut text, fm);
    text.push_str(footer);
    Ok(text)
}

/// Slice the header and footer out of the original document
fn split_original(content: &str) -> Result<(&str, &str)> {
    let section_pos = content
        .find(AERO_SECTION_MARKER)
        .ok_or(AeroError::MissingMarker(AERO_SECTION_MARKER))?;
    let header_end = content[..section_pos].rfind('\n').map_or(0, |pos| pos + 1);

    let end_pos = content[section_pos..]
        .find(AERO_END_MARKER)
        .map(|pos| section_pos + pos)
        .ok_or(AeroError::MissingMarker(AERO_END_MARKER))?;
    let footer_start = content[end_pos..]
        .find('\n')
        .map_or(content.len(), |pos| end_pos + pos + 1);

    Ok((&content[..header_end], &content[footer_start..]))
}

fn write_aero_section(text: &mut String, fm: &FlightModel) {
    text.push_str("#     ");
    text.push_str(AERO_SECTION_MARKER);
    text.push_str("\n#\n");

    if fm.aerodata_options.any() {
        write_options(text, fm);
    }

    write_array(text, &fm.mach_breakpoints, "MACH BREAKPOINTS", "Num MACH");
    write_array(text, &fm.alpha_breakpoints, "ALPHA BREAKPOINTS", "Num Alpha");

    for coefficient in Coefficient::ALL {
        write_table(
            text,
            fm.table(coefficient),
            Some(fm.multiplier(coefficient)),
            &fm.mach_breakpoints,
            table_title(coefficient),
        );
    }

    if fm.aerodata_options.advanced_tef {
        write_advanced_tef(text, fm);
    }

    text.push_str("#\n# ");
    text.push_str(AERO_END_MARKER);
    text.push('\n');
}

fn table_title(coefficient: Coefficient) -> &'static str {
    match coefficient {
        Coefficient::Cl => "LIFT COEFFICIENT  CL",
        Coefficient::Cd => "DRAG COEFFICIENT  CD",
        Coefficient::Cy => "SIDE FORCE DERIVATIVE CY-BETA",
    }
}

fn write_options(text: &mut String, fm: &FlightModel) {
    text.push_str("# AERODATA OPTIONS MUST BE LISTED HERE\n");
    if fm.aerodata_options.advanced_tef {
        text.push_str(&format!("{} {}\n", AEROPT_KEYWORD, AEROPT_ADVANCED_TEF));
    }
    if fm.aerodata_options.lef_included_in_cl {
        text.push_str(&format!("{} {}\n", AEROPT_KEYWORD, AEROPT_LEF_INCLUDED_IN_CL));
    }
}

fn write_advanced_tef(text: &mut String, fm: &FlightModel) {
    text.push_str("#\n#\n# TEF PARAMETERS HERE\n#\n");
    write_array(text, &fm.tef_mach_breakpoints, "TEF MACH BREAKPOINTS", "Num MACH");
    write_array(text, &fm.tef_alpha_breakpoints, "TEF ALPHA BREAKPOINTS", "Num Alpha");
    write_table(
        text,
        &fm.tef_cl,
        None,
        &fm.tef_mach_breakpoints,
        "LIFT TEF COEFFICIENT  CL TEF",
    );
    write_table(
        text,
        &fm.tef_cd,
        None,
        &fm.tef_mach_breakpoints,
        "DRAG TEF COEFFICIENT  CD TEF",
    );
}

fn write_sub_header(text: &mut String, title: &str) {
    text.push_str(&format!(
        "#\n{rule}\n#     {title}\n{rule}\n",
        rule = SUB_HEADER_RULE
    ));
}

/// Write values wrapped at `MAX_VALUES_PER_LINE` per line, ending with a newline
fn write_values(text: &mut String, values: &[f64]) {
    for (i, &value) in values.iter().enumerate() {
        text.push_str(&format_value(value));
        if (i + 1) % MAX_VALUES_PER_LINE == 0 && i != values.len() - 1 {
            text.push('\n');
        }
    }
    text.push('\n');
}

fn write_array(text: &mut String, values: &[f64], title: &str, count_label: &str) {
    write_sub_header(text, title);
    text.push_str(&format!(
        "{} # {}\n",
        format_unpadded(values.len() as f64),
        count_label
    ));
    text.push_str("#\n");
    write_values(text, values);
}

fn write_table(
    text: &mut String,
    table: &Table,
    multiplier: Option<f64>,
    mach_breakpoints: &[f64],
    title: &str,
) {
    write_sub_header(text, title);
    if let Some(mul) = multiplier {
        text.push_str(&format!("{} # Table Multiplier\n", format_unpadded(mul)));
    }

    for (row, mach) in table.iter().zip(mach_breakpoints) {
        text.push_str(&format!("#\n# Mach {:.1}\n", mach));
        write_values(text, row);
    }
}
