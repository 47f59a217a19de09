use crate::args::Format;
use anyhow::Result;
use colored::{ColoredString, Colorize};
use mp4_pssh::{DrmSystem, Pssh};
use std::fmt::Write;

/// Drop repeated key ids, keeping the first occurrence of each.
pub fn unique(pssh: &Pssh) -> Pssh {
    let mut cenc_key_ids = Vec::with_capacity(pssh.cenc_key_ids.len());

    for key_id in &pssh.cenc_key_ids {
        if !cenc_key_ids.contains(key_id) {
            cenc_key_ids.push(*key_id);
        }
    }

    Pssh {
        system_ids: pssh.system_ids.clone(),
        cenc_key_ids,
    }
}

pub fn render(pssh: &Pssh, format: Format, uuid: bool, color: bool) -> Result<String> {
    if format == Format::Json {
        return Ok(serde_json::to_string_pretty(pssh)? + "\n");
    }

    let mut out = String::new();
    let paint = |x: ColoredString| if color { x } else { x.clear() };

    for system_id in &pssh.system_ids {
        let label = match system_id.kind() {
            DrmSystem::Other => "SYSTEM".to_owned(),
            x => x.to_string().to_uppercase(),
        };
        let value = if uuid {
            system_id.uuid()
        } else {
            system_id.to_string()
        };
        writeln!(out, "[{}] {}", paint(label.cyan()), value)?;
    }

    for key_id in &pssh.cenc_key_ids {
        let value = if uuid {
            key_id.uuid()
        } else {
            key_id.to_string()
        };
        writeln!(out, "[{}] {}", paint("KID".green()), value)?;
    }

    Ok(out)
}
