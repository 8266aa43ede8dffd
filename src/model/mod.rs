/// Flight model data structures

/// Mach breakpoint insertion
pub mod interpolate;

use crate::error::{AeroError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Coefficient table, indexed `[mach][alpha]`
pub type Table = Vec<Vec<f64>>;

/// Aerodata option flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AerodataOptions {
    /// Advanced trailing edge flap tables follow the base tables
    pub advanced_tef: bool,
    /// Leading edge flap lift is already included in CL
    pub lef_included_in_cl: bool,
}

impl AerodataOptions {
    /// True if any option is set
    pub fn any(&self) -> bool {
        self.advanced_tef || self.lef_included_in_cl
    }
}

/// Selects one of the base coefficient tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coefficient {
    /// Lift coefficient
    Cl,
    /// Drag coefficient
    Cd,
    /// Side force derivative (CY-beta)
    Cy,
}

impl Coefficient {
    /// All base coefficients in file order
    pub const ALL: [Coefficient; 3] = [Coefficient::Cl, Coefficient::Cd, Coefficient::Cy];

    /// Short name as used in the file
    pub fn name(&self) -> &'static str {
        match self {
            Coefficient::Cl => "CL",
            Coefficient::Cd => "CD",
            Coefficient::Cy => "CY",
        }
    }

    /// Parse a short name, case-insensitive
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cl" => Some(Coefficient::Cl),
            "cd" => Some(Coefficient::Cd),
            "cy" => Some(Coefficient::Cy),
            _ => None,
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Aerodynamic data of a basic flight model
///
/// Tables hold raw values; multipliers are only applied by the
/// `multiplied_*` views. The original document text is kept so that saving
/// reproduces everything outside the aero section unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightModel {
    /// Aerodata option flags
    pub aerodata_options: AerodataOptions,

    /// Mach breakpoints, strictly ascending
    pub mach_breakpoints: Vec<f64>,
    /// Angle of attack breakpoints
    pub alpha_breakpoints: Vec<f64>,
    /// Lift coefficient table
    pub cl: Table,
    /// Drag coefficient table
    pub cd: Table,
    /// Side force derivative table
    pub cy: Table,
    /// Lift table multiplier
    pub cl_mul: f64,
    /// Drag table multiplier
    pub cd_mul: f64,
    /// Side force table multiplier
    pub cy_mul: f64,

    /// TEF Mach breakpoints (advanced TEF only)
    pub tef_mach_breakpoints: Vec<f64>,
    /// TEF angle of attack breakpoints (advanced TEF only)
    pub tef_alpha_breakpoints: Vec<f64>,
    /// TEF lift table (advanced TEF only)
    pub tef_cl: Table,
    /// TEF drag table (advanced TEF only)
    pub tef_cd: Table,

    pub(crate) original_content: String,
}

impl FlightModel {
    pub(crate) fn with_content(original_content: String) -> Self {
        Self {
            aerodata_options: AerodataOptions::default(),
            mach_breakpoints: Vec::new(),
            alpha_breakpoints: Vec::new(),
            cl: Vec::new(),
            cd: Vec::new(),
            cy: Vec::new(),
            cl_mul: 1.0,
            cd_mul: 1.0,
            cy_mul: 1.0,
            tef_mach_breakpoints: Vec::new(),
            tef_alpha_breakpoints: Vec::new(),
            tef_cl: Vec::new(),
            tef_cd: Vec::new(),
            original_content,
        }
    }

    /// Open a flight model data file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::io::read_dat(path)
    }

    /// Save to a file, replacing any existing content
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::io::write_dat(self, path)
    }

    /// Render the complete document
    pub fn to_dat_string(&self) -> Result<String> {
        crate::io::write_dat_string(self)
    }

    /// The document text this model was loaded from
    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    /// Get a base table
    pub fn table(&self, coefficient: Coefficient) -> &Table {
        match coefficient {
            Coefficient::Cl => &self.cl,
            Coefficient::Cd => &self.cd,
            Coefficient::Cy => &self.cy,
        }
    }

    /// Get a mutable reference to a base table
    pub fn table_mut(&mut self, coefficient: Coefficient) -> &mut Table {
        match coefficient {
            Coefficient::Cl => &mut self.cl,
            Coefficient::Cd => &mut self.cd,
            Coefficient::Cy => &mut self.cy,
        }
    }

    /// Get a base table multiplier
    pub fn multiplier(&self, coefficient: Coefficient) -> f64 {
        match coefficient {
            Coefficient::Cl => self.cl_mul,
            Coefficient::Cd => self.cd_mul,
            Coefficient::Cy => self.cy_mul,
        }
    }

    /// Set a base table multiplier
    pub fn set_multiplier(&mut self, coefficient: Coefficient, value: f64) {
        match coefficient {
            Coefficient::Cl => self.cl_mul = value,
            Coefficient::Cd => self.cd_mul = value,
            Coefficient::Cy => self.cy_mul = value,
        }
    }

    /// Base table with its multiplier applied to every cell
    pub fn multiplied(&self, coefficient: Coefficient) -> Table {
        let mul = self.multiplier(coefficient);
        self.table(coefficient)
            .iter()
            .map(|row| row.iter().map(|v| v * mul).collect())
            .collect()
    }

    /// CL table with `cl_mul` applied
    pub fn multiplied_cl(&self) -> Table {
        self.multiplied(Coefficient::Cl)
    }

    /// CD table with `cd_mul` applied
    pub fn multiplied_cd(&self) -> Table {
        self.multiplied(Coefficient::Cd)
    }

    /// CY table with `cy_mul` applied
    pub fn multiplied_cy(&self) -> Table {
        self.multiplied(Coefficient::Cy)
    }

    /// Check that Mach breakpoints are strictly ascending and every table
    /// matches its breakpoint arrays
    ///
    /// TEF tables are only checked when `advanced_tef` is set.
    pub fn check_shapes(&self) -> Result<()> {
        if let Some(index) = self
            .mach_breakpoints
            .windows(2)
            .position(|pair| pair[0].partial_cmp(&pair[1]) != Some(Ordering::Less))
        {
            return Err(AeroError::inconsistent(
                "Mach breakpoints",
                format!(
                    "{} at index {} is not above {}",
                    self.mach_breakpoints[index + 1],
                    index + 1,
                    self.mach_breakpoints[index]
                ),
            ));
        }

        for coefficient in Coefficient::ALL {
            check_table(
                coefficient.name(),
                self.table(coefficient),
                self.mach_breakpoints.len(),
                self.alpha_breakpoints.len(),
            )?;
        }

        if self.aerodata_options.advanced_tef {
            let rows = self.tef_mach_breakpoints.len();
            let cols = self.tef_alpha_breakpoints.len();
            check_table("CL TEF", &self.tef_cl, rows, cols)?;
            check_table("CD TEF", &self.tef_cd, rows, cols)?;
        }

        Ok(())
    }
}

fn check_table(name: &'static str, table: &Table, rows: usize, cols: usize) -> Result<()> {
    if table.len() != rows {
        return Err(AeroError::inconsistent(
            name,
            format!("{} rows for {} Mach breakpoints", table.len(), rows),
        ));
    }

    if let Some((index, row)) = table.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(AeroError::inconsistent(
            name,
            format!(
                "row {} has {} values for {} alpha breakpoints",
                index,
                row.len(),
                cols
            ),
        ));
    }

    Ok(())
}

impl FromStr for FlightModel {
    type Err = AeroError;

    fn from_str(s: &str) -> Result<Self> {
        crate::io::parse_dat(s)
    }
}
