/// Glyph3D Terminal Demo - two letter solids
///
/// Controls:
///   - 1 / 2 / c: select letter A, letter B or the camera
///   - WASD / Arrow Keys, e/r: rotate the selection about X, Y, Z
///   - +/-: letter scale, h/H j/J k/K: height, width, depth
///   - x/y: mirror, m: display mode, 0: reset
///   - q/ESC: Quit
///
/// With `RUST_LOG` set, log output goes to `glyph3d-terminal.log`.

use glyph3d_core::SceneConfig;
use glyph3d_terminal::{file_logger, TerminalApp};
use std::fs::File;
use std::io;

const LOG_FILE: &str = "glyph3d-terminal.log";

fn main() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        file_logger(File::create(LOG_FILE)?).init();
    }

    let mut app = TerminalApp::new(SceneConfig::default())?;
    app.run()?;

    println!("Thank you for using Glyph3D!");
    Ok(())
}
