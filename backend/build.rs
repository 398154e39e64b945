use std::fs;
use std::path::Path;

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
            .unwrap();
    } else {
        // `include_dir!` needs the folder even before the first trunk build.
        let embedded = out_dir.join("dist");
        fs::create_dir_all(&embedded).unwrap();
        let index = embedded.join("index.html");
        if !index.exists() {
            fs::write(
                index,
                "<!doctype html><title>CIN</title><p>Run <code>trunk build</code> in frontend/.</p>",
            )
                .unwrap();
        }
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
