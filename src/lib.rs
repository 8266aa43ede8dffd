/*!
# bfmaero

A Rust library for reading, editing and writing the basic aerodynamic
coefficient tables of flight model `.dat` files.

## Features

- Read the Mach/alpha breakpoints and CL, CD and CY-beta tables, including
  the optional advanced trailing edge flap (TEF) block
- Insert new Mach breakpoints with linearly interpolated or extrapolated rows
- Write the data back, keeping everything outside the aero section
  byte-for-byte as it was

## Quick Start

```rust,no_run
use bfmaero::{Coefficient, FlightModel};

// Open an existing data file
let mut fm = FlightModel::open("f16.dat")?;

// Add a breakpoint between (or beyond) the existing ones
fm.insert_mach_breakpoint(0.95)?;

// Scale the drag table
fm.set_multiplier(Coefficient::Cd, 1.05);
let drag = fm.multiplied_cd();
println!("CD at first breakpoint: {:?}", drag[0]);

// Save changes
fm.save("f16.dat")?;
# Ok::<(), bfmaero::AeroError>(())
```

## Modules

- `format`: Markers, layout constants and tokenization
- `io`: Token reader, document reader and writer
- `model`: The flight model and breakpoint insertion
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// Error types and Result alias
pub mod error;
/// Aero data markers, constants and tokenization
pub mod format;
/// I/O operations for reading and writing aero data files
pub mod io;
/// Flight model data structures
pub mod model;

// Re-export common types
pub use error::{AeroError, Result};
pub use format::{tokenize, Token};
pub use io::{parse_dat, read_dat, write_dat, write_dat_string, TokenReader};
pub use model::{AerodataOptions, Coefficient, FlightModel, Table};
