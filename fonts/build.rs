use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;
use zip::ZipArchive;

const FONT_FILE: &str = "SourceHanSansSC-Regular.otf";
const ZIP_URL: &str = "https://github.com/adobe-fonts/source-han-sans/releases/download/2.005R/09_SourceHanSansSC.zip";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FONT_TTF");
    println!("cargo:rerun-if-env-changed=FONTS_OFFLINE");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let target_font = out_dir.join(FONT_FILE);

    // Incremental build with a real font already in place
    if fs::metadata(&target_font).map(|m| m.len() > 0).unwrap_or(false) {
        return;
    }

    if let Ok(path) = env::var("FONT_TTF") {
        match fs::copy(&path, &target_font) {
            Ok(_) => return,
            Err(e) => println!("cargo:warning=failed to copy FONT_TTF {path}: {e}"),
        }
    }

    if env::var_os("FONTS_OFFLINE").is_none() {
        match download_and_extract(&out_dir, &target_font) {
            Ok(()) => return,
            Err(e) => println!("cargo:warning={e}; worksheets will fall back to system fonts"),
        }
    }

    // An empty face keeps `include_bytes!` valid; renderers check for it.
    fs::write(&target_font, b"").expect("write placeholder font failed");
}

fn download_and_extract(out_dir: &Path, target_font: &Path) -> Result<(), String> {
    let zip_path = out_dir.join("SourceHanSansSC.zip");
    let zip_arg = zip_path.to_str().ok_or("non-utf8 OUT_DIR")?;
    let curl = Command::new("curl")
        .args(["-L", "-f", "--connect-timeout", "20", "-o", zip_arg, ZIP_URL])
        .status();
    let fetched = match curl {
        Ok(st) if st.success() => true,
        _ => matches!(
            Command::new("wget").args(["-T", "20", "-O", zip_arg, ZIP_URL]).status(),
            Ok(st) if st.success()
        ),
    };
    if !fetched {
        return Err(format!("failed to download {ZIP_URL}"));
    }

    let mut data = Vec::new();
    fs::File::open(&zip_path)
        .and_then(|mut f| f.read_to_end(&mut data))
        .map_err(|e| format!("zip read failed: {e}"))?;
    let mut zip =
        ZipArchive::new(std::io::Cursor::new(data)).map_err(|e| format!("zip parse failed: {e}"))?;
    // Either at the archive root or under OTF/
    for i in 0..zip.len() {
        let mut file = zip.by_index(i).map_err(|e| format!("zip entry {i}: {e}"))?;
        if file.name().ends_with(FONT_FILE) {
            let mut buf = Vec::new();
            std::io::copy(&mut file, &mut buf).map_err(|e| format!("extract failed: {e}"))?;
            fs::write(target_font, &buf).map_err(|e| format!("write otf failed: {e}"))?;
            return Ok(());
        }
    }
    Err(format!("{FONT_FILE} not found in zip"))
}
