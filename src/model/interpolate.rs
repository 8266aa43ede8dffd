/// Mach breakpoint insertion by linear interpolation and extrapolation

use super::{Coefficient, FlightModel, Table};
use crate::error::{AeroError, Result};

impl FlightModel {
    /// Insert a Mach breakpoint, adding one row to each of CL, CD and CY
    ///
    /// New rows are linearly interpolated between the neighbouring
    /// breakpoints, or extrapolated from the two nearest ones when the value
    /// lies outside the current range. With a single breakpoint its row is
    /// copied; with none the row is all zeros.
    ///
    /// Returns `Ok(false)` without changing anything if the breakpoint
    /// already exists. Alpha breakpoints, multipliers and TEF data are never
    /// touched.
    pub fn insert_mach_breakpoint(&mut self, mach: f64) -> Result<bool> {
        if !mach.is_finite() {
            return Err(AeroError::InvalidBreakpoint(mach));
        }
        self.check_shapes()?;

        let index = match insertion_index(&self.mach_breakpoints, mach) {
            Some(index) => index,
            None => {
                tracing::debug!(mach, "Mach breakpoint already present");
                return Ok(false);
            }
        };

        // All rows are computed against the breakpoints as they were before
        // the insertion.
        let width = self.alpha_breakpoints.len();
        let new_rows = Coefficient::ALL.map(|coefficient| {
            new_row(
                &self.mach_breakpoints,
                self.table(coefficient),
                index,
                mach,
                width,
            )
        });

        self.mach_breakpoints.insert(index, mach);
        for (coefficient, row) in Coefficient::ALL.into_iter().zip(new_rows) {
            self.table_mut(coefficient).insert(index, row);
        }

        tracing::debug!(mach, index, "inserted Mach breakpoint");
        Ok(true)
    }
}

/// Position of the first breakpoint greater than `mach`, or `None` if equal
/// to an existing one
fn insertion_index(breakpoints: &[f64], mach: f64) -> Option<usize> {
    for (i, &bp) in breakpoints.iter().enumerate() {
        if bp == mach {
            return None;
        }
        if mach < bp {
            return Some(i);
        }
    }
    Some(breakpoints.len())
}

fn new_row(breakpoints: &[f64], table: &Table, index: usize, mach: f64, width: usize) -> Vec<f64> {
    let count = breakpoints.len();
    match count {
        0 => vec![0.0; width],
        1 => table[0].clone(),
        _ => {
            // (lower, upper) reference pair; the anchor is the reference
            // breakpoint nearest to the new value
            let (lower, upper, anchor) = if index == 0 {
                (0, 1, 0)
            } else if index == count {
                (count - 2, count - 1, count - 1)
            } else {
                (index - 1, index, index - 1)
            };

            let span = breakpoints[upper] - breakpoints[lower];
            let dist = mach - breakpoints[anchor];
            (0..width)
                .map(|i| {
                    let slope = (table[upper][i] - table[lower][i]) / span;
                    table[anchor][i] + slope * dist
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn model(mach: &[f64], cl: &[&[f64]]) -> FlightModel {
        let width = cl.first().map_or(0, |r| r.len());
        let table: Table = cl.iter().map(|r| r.to_vec()).collect();
        let mut fm = FlightModel::with_content(String::new());
        fm.mach_breakpoints = mach.to_vec();
        fm.alpha_breakpoints = (0..width).map(|i| i as f64 * 5.0).collect();
        fm.cl = table.clone();
        fm.cd = table.clone();
        fm.cy = table;
        fm
    }

    fn assert_rows_close(actual: &Table, expected: &[&[f64]]) {
        assert_eq!(actual.len(), expected.len());
        for (a_row, e_row) in actual.iter().zip(expected) {
            assert_eq!(a_row.len(), e_row.len());
            for (a, e) in a_row.iter().zip(e_row.iter()) {
                assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
            }
        }
    }

    #[test]
    fn test_interpolate_midpoint() {
        let mut fm = model(&[1.0, 2.0], &[&[10.0], &[20.0]]);
        assert!(fm.insert_mach_breakpoint(1.5).unwrap());
        assert_eq!(fm.mach_breakpoints, vec![1.0, 1.5, 2.0]);
        assert_rows_close(&fm.cl, &[&[10.0], &[15.0], &[20.0]]);
    }

    #[test]
    fn test_interpolate_off_centre() {
        let mut fm = model(&[0.2, 0.6, 1.0], &[&[0.0, 1.0], &[4.0, 3.0], &[8.0, 5.0]]);
        fm.insert_mach_breakpoint(0.7).unwrap();
        assert_rows_close(
            &fm.cl,
            &[&[0.0, 1.0], &[4.0, 3.0], &[5.0, 3.5], &[8.0, 5.0]],
        );
    }

    #[test]
    fn test_extrapolate_below() {
        let mut fm = model(&[2.0, 3.0], &[&[10.0], &[20.0]]);
        fm.insert_mach_breakpoint(1.0).unwrap();
        assert_eq!(fm.mach_breakpoints, vec![1.0, 2.0, 3.0]);
        assert_rows_close(&fm.cl, &[&[0.0], &[10.0], &[20.0]]);
    }

    #[test]
    fn test_extrapolate_above() {
        let mut fm = model(&[1.0, 2.0, 3.0], &[&[5.0], &[10.0], &[20.0]]);
        fm.insert_mach_breakpoint(3.5).unwrap();
        assert_eq!(fm.mach_breakpoints, vec![1.0, 2.0, 3.0, 3.5]);
        assert_rows_close(&fm.cl, &[&[5.0], &[10.0], &[20.0], &[25.0]]);
    }

    #[test]
    fn test_single_breakpoint_copies_row() {
        let mut fm = model(&[2.0], &[&[10.0]]);
        fm.insert_mach_breakpoint(3.0).unwrap();
        assert_eq!(fm.mach_breakpoints, vec![2.0, 3.0]);
        assert_eq!(fm.cl, vec![vec![10.0], vec![10.0]]);

        let mut fm = model(&[2.0], &[&[10.0, 11.0]]);
        fm.insert_mach_breakpoint(1.0).unwrap();
        assert_eq!(fm.mach_breakpoints, vec![1.0, 2.0]);
        assert_eq!(fm.cd, vec![vec![10.0, 11.0], vec![10.0, 11.0]]);
    }

    #[test]
    fn test_empty_model_gets_zero_row() {
        let mut fm = model(&[], &[]);
        fm.alpha_breakpoints = vec![0.0, 5.0, 10.0];
        fm.insert_mach_breakpoint(0.4).unwrap();
        assert_eq!(fm.mach_breakpoints, vec![0.4]);
        assert_eq!(fm.cy, vec![vec![0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_duplicate_is_noop() {
        let mut fm = model(&[1.0, 2.0], &[&[10.0], &[20.0]]);
        let before = fm.clone();
        assert!(!fm.insert_mach_breakpoint(2.0).unwrap());
        assert_eq!(fm, before);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut fm = model(&[1.0, 2.0], &[&[10.0], &[20.0]]);
        let before = fm.clone();
        assert!(matches!(
            fm.insert_mach_breakpoint(f64::NAN),
            Err(AeroError::InvalidBreakpoint(_))
        ));
        assert!(fm.insert_mach_breakpoint(f64::INFINITY).is_err());
        assert_eq!(fm, before);
    }

    #[test]
    fn test_all_tables_updated_independently() {
        let mut fm = model(&[1.0, 2.0], &[&[10.0], &[20.0]]);
        fm.cd = vec![vec![1.0], vec![3.0]];
        fm.cy = vec![vec![-4.0], vec![-2.0]];
        fm.cl_mul = 3.0;
        fm.insert_mach_breakpoint(1.5).unwrap();
        assert_rows_close(&fm.cl, &[&[10.0], &[15.0], &[20.0]]);
        assert_rows_close(&fm.cd, &[&[1.0], &[2.0], &[3.0]]);
        assert_rows_close(&fm.cy, &[&[-4.0], &[-3.0], &[-2.0]]);
        assert_eq!(fm.cl_mul, 3.0);
        assert_eq!(fm.alpha_breakpoints, vec![0.0]);
    }

    #[test]
    fn test_tef_data_untouched() {
        let mut fm = model(&[1.0, 2.0], &[&[10.0], &[20.0]]);
        fm.aerodata_options.advanced_tef = true;
        fm.tef_mach_breakpoints = vec![0.5];
        fm.tef_alpha_breakpoints = vec![0.0, 1.0];
        fm.tef_cl = vec![vec![0.1, 0.2]];
        fm.tef_cd = vec![vec![0.3, 0.4]];
        let before = fm.clone();

        fm.insert_mach_breakpoint(0.5).unwrap();
        assert_eq!(fm.tef_mach_breakpoints, before.tef_mach_breakpoints);
        assert_eq!(fm.tef_cl, before.tef_cl);
        assert_eq!(fm.tef_cd, before.tef_cd);
    }

    #[test]
    fn test_inconsistent_table_leaves_model_unchanged() {
        let mut fm = model(&[1.0, 2.0], &[&[10.0], &[20.0]]);
        fm.cy.pop();
        let before = fm.clone();
        assert!(matches!(
            fm.insert_mach_breakpoint(1.5),
            Err(AeroError::InconsistentTable { table: "CY", .. })
        ));
        assert_eq!(fm, before);
    }

    #[test]
    fn test_unsorted_breakpoints_rejected() {
        let mut fm = model(&[0.9, 0.2], &[&[1.0], &[2.0]]);
        let before = fm.clone();
        assert!(matches!(
            fm.insert_mach_breakpoint(0.5),
            Err(AeroError::InconsistentTable {
                table: "Mach breakpoints",
                ..
            })
        ));
        assert_eq!(fm, before);

        assert!(fm.insert_mach_breakpoint(0.2).is_err());
        assert_eq!(fm, before);
    }

    proptest! {
        /// Breakpoints stay strictly ascending and every table keeps one row per breakpoint.
        #[test]
        fn insertions_keep_breakpoints_sorted(values in prop::collection::vec(-5.0f64..5.0, 0..20)) {
            let mut fm = model(&[0.0, 1.0], &[&[1.0, 2.0], &[3.0, 5.0]]);
            for v in values {
                fm.insert_mach_breakpoint(v).unwrap();
            }
            prop_assert!(fm.mach_breakpoints.windows(2).all(|w| w[0] < w[1]));
            for coefficient in Coefficient::ALL {
                prop_assert_eq!(fm.table(coefficient).len(), fm.mach_breakpoints.len());
                prop_assert!(fm.table(coefficient).iter().all(|r| r.len() == 2));
            }
        }

        /// Inserting the same value twice equals inserting it once.
        #[test]
        fn insertion_is_idempotent(v in -5.0f64..5.0) {
            let mut once = model(&[0.0, 1.0, 2.5], &[&[1.0], &[3.0], &[4.0]]);
            once.insert_mach_breakpoint(v).unwrap();
            let mut twice = once.clone();
            prop_assert!(!twice.insert_mach_breakpoint(v).unwrap());
            prop_assert_eq!(once, twice);
        }

        /// Data that is linear in Mach stays on the same line after insertion.
        #[test]
        fn linear_data_is_preserved(v in -5.0f64..5.0) {
            let mut fm = model(&[0.0, 1.0, 2.0], &[&[1.0], &[3.0], &[5.0]]);
            if fm.insert_mach_breakpoint(v).unwrap() {
                let index = fm.mach_breakpoints.iter().position(|&m| m == v).unwrap();
                prop_assert!((fm.cl[index][0] - (1.0 + 2.0 * v)).abs() < 1e-9);
            }
        }
    }
}
