use pseudolab_core::{LabConfig, Result};

use super::{GenerationArgs, print_json};
use crate::render;
use crate::session::Session;

pub fn run(args: &GenerationArgs, config: &LabConfig, json: bool) -> Result<()> {
    let request = args.to_request(config)?;
    let mut session = Session::new();
    let result = session.generate(&request);

    if json {
        return print_json(result);
    }
    if result.is_empty() {
        eprintln!("Warning: no numbers requested (count is 0)");
    }
    print!("{}", render::render_trace(result));
    Ok(())
}
