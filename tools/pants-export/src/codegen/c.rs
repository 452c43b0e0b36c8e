//! C header / C++ source generator
//!
//! Produces the `data.h` + `data.cpp` pair the editor links against. The
//! layout (typedef names, block names, 16 values per row) is what the editor
//! and its platform layers expect and must stay stable.

use anyhow::Result;
use pants_common::{DataPack, SAMPLE_TABLE_CAPACITY};
use std::fmt::Write as FmtWrite;

use super::CodegenOptions;

const GENERATOR: &str = "pants-export";

/// Values per emitted row
const ROW_LEN: usize = 16;

/// Array bound for the sample table; the editor spells the standard size as an expression
fn sample_table_bound(capacity: usize) -> String {
    if capacity == SAMPLE_TABLE_CAPACITY {
        "(15*13)+8".to_string()
    } else {
        capacity.to_string()
    }
}

fn size_constant(blob_name: &str) -> String {
    format!("{}_SIZE", blob_name.to_ascii_uppercase())
}

fn icon_symbol(name: &str) -> String {
    format!("icondata_{}", name.to_ascii_lowercase())
}

/// Generate the header declaring every table
pub fn generate_header(pack: &DataPack, options: &CodegenOptions) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "#pragma once")?;
    writeln!(output)?;
    writeln!(output, "// {}", options.header_name)?;
    writeln!(output, "//   auto generated by {}", GENERATOR)?;
    writeln!(output)?;
    writeln!(output, "#include \"os.h\"")?;
    writeln!(output)?;

    writeln!(output, "typedef struct")?;
    writeln!(output, "{{")?;
    writeln!(output, "    int w;")?;
    writeln!(output, "    int h;")?;
    writeln!(output, "    const unsigned char* d;")?;
    writeln!(output, "}} IconData;")?;
    writeln!(output)?;
    writeln!(output, "typedef struct")?;
    writeln!(output, "{{")?;
    writeln!(output, "    unsigned int len;")?;
    writeln!(output, "    const sint16* d;")?;
    writeln!(output, "}} SampleData;")?;
    writeln!(output)?;

    for blob in &pack.blobs {
        let size = size_constant(&blob.name);
        writeln!(output, "const unsigned int {} = {};", size, blob.size())?;
        writeln!(
            output,
            "extern const unsigned char {}_block[{}];",
            blob.name, size
        )?;
        writeln!(output)?;
    }

    writeln!(output, "extern const sint16 sample_block[];")?;
    writeln!(
        output,
        "extern const SampleData sampledata[{}];",
        sample_table_bound(options.sample_capacity)
    )?;
    writeln!(output)?;

    writeln!(output, "const int ICON_COUNT = {};", pack.images.len())?;
    writeln!(output, "extern const unsigned char icon_block[];")?;
    writeln!(output, "extern const IconData* icondata[ICON_COUNT];")?;
    writeln!(output)?;

    writeln!(output, "enum {{")?;
    for image in &pack.images.descriptors {
        writeln!(output, "    ICON_{},", image.name)?;
    }
    writeln!(output, "}};")?;
    writeln!(output)?;
    writeln!(output, "// end of file")?;

    Ok(output)
}

/// Generate the source defining every table
pub fn generate_source(pack: &DataPack, options: &CodegenOptions) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "// {}", options.source_name)?;
    writeln!(output, "//   auto generated by {}", GENERATOR)?;
    writeln!(output)?;
    writeln!(output, "#include \"{}\"", options.header_name)?;
    writeln!(output)?;

    for blob in &pack.blobs {
        writeln!(
            output,
            "const unsigned char {}_block[{}] =",
            blob.name,
            size_constant(&blob.name)
        )?;
        write_hex_block(&mut output, &blob.bytes)?;
        writeln!(output, ";")?;
        writeln!(output)?;
    }

    writeln!(output, "const sint16 sample_block[] =")?;
    write_int_block(&mut output, &pack.samples.backing)?;
    writeln!(output, ";")?;
    writeln!(output)?;

    writeln!(output, "const unsigned char icon_block[] =")?;
    write_hex_block(&mut output, &pack.images.backing)?;
    writeln!(output, ";")?;
    writeln!(output)?;

    writeln!(
        output,
        "const SampleData sampledata[{}] = {{",
        sample_table_bound(options.sample_capacity)
    )?;
    for sample in &pack.samples.descriptors {
        writeln!(
            output,
            "    {{ {}, sample_block + {} }},",
            sample.length, sample.offset
        )?;
    }
    writeln!(output, "}};")?;
    writeln!(output)?;

    for image in &pack.images.descriptors {
        writeln!(
            output,
            "const IconData {} = {{ {}, {}, icon_block + {} }};",
            icon_symbol(&image.name),
            image.width,
            image.height,
            image.offset
        )?;
    }
    writeln!(output)?;

    writeln!(output, "const IconData* icondata[ICON_COUNT] = {{")?;
    for image in &pack.images.descriptors {
        writeln!(output, "    &{},", icon_symbol(&image.name))?;
    }
    writeln!(output, "}};")?;
    writeln!(output)?;
    writeln!(output, "// end of file")?;

    Ok(output)
}

/// `  { 0x00,0x01,...` with a line break after every 16th value
fn write_hex_block(output: &mut String, data: &[u8]) -> std::fmt::Result {
    write!(output, "  {{ ")?;
    for (i, byte) in data.iter().enumerate() {
        write!(output, "0x{:02X},", byte)?;
        if i % ROW_LEN == ROW_LEN - 1 {
            write!(output, "\n    ")?;
        }
    }
    write!(output, "}}")
}

/// Same layout as [`write_hex_block`], values right-aligned in 6 columns
fn write_int_block(output: &mut String, data: &[i16]) -> std::fmt::Result {
    write!(output, "  {{ ")?;
    for (i, value) in data.iter().enumerate() {
        write!(output, "{:6},", value)?;
        if i % ROW_LEN == ROW_LEN - 1 {
            write!(output, "\n    ")?;
        }
    }
    write!(output, "}}")
}
