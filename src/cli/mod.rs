mod dot;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use codespan_reporting::files::SimpleFiles;
use jmm_common::ir::ClassUnit;
use log::info;

use crate::args::Arguments;
use crate::console_driver::ConsoleDriver;
use crate::input::read_source;
use crate::output::{failure, output_path, status, write_listing};

pub use self::dot::GraphViz;

/// Compile the file given on the command line. Returns whether it compiled
/// without errors.
pub fn run(args: &Arguments) -> anyhow::Result<bool> {
    let opts = args.options();
    let src = read_source(&opts.path)?;

    let mut files = SimpleFiles::new();
    let file = files.add(opts.path.display().to_string(), src.clone());

    let dumps = opts.dump.iter().copied().map(Into::into).collect();
    let mut driver = ConsoleDriver::new(files, dumps);

    info!("reading `{}`", opts.path.display());
    let Some(mut class) = jmm_ollir::read(&mut driver, &src, file) else {
        failure(opts.path.display().to_string())?;
        return Ok(false);
    };

    jmm_midend::allocate(&mut driver, &mut class, opts.registers);

    if let Some(path) = &opts.interference_dot {
        write_dot(path, &class)?;
    }

    let Some(code) = jmm_backend::generate(&mut driver, &class) else {
        failure(&class.name)?;
        return Ok(false);
    };

    if args.command.build() {
        let path = output_path(opts, &class.name);
        write_listing(&path, &code)?;
        status("wrote", path.display().to_string())?;
    } else {
        status("checked", &class.name)?;
    }

    if driver.warnings() > 0 {
        info!("{} warning(s) in `{}`", driver.warnings(), class.name);
    }

    Ok(driver.errors() == 0)
}

fn write_dot(path: &Path, class: &ClassUnit) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    GraphViz::new(class).render(&mut writer)?;
    Ok(())
}
