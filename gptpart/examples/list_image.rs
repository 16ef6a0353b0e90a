// SPDX-License-Identifier: MIT
// cargo run -p gptpart --example list_image -- disk.img
use gptpart::prelude::*;

fn main() -> Result<(), GptError> {
    let path = std::env::args()
        .nth(1)
        .ok_or(GptError::Invalid("usage: list_image <IMAGE>"))?;

    let table = read_gpt_from_path(&path, &ReadOptions::default())?;
    println!("{table}");

    if let Err(e) = table.verify_crc32() {
        eprintln!("warning: {e}");
    }
    Ok(())
}
