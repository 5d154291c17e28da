/// Build script for ripplespread
/// Embeds the git revision shown by `ripplespread version`

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");

    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
    {
        if output.status.success() {
            if let Ok(hash) = String::from_utf8(output.stdout) {
                println!("cargo:rustc-env=RIPPLESPREAD_GIT_HASH={}", hash.trim());
            }
        }
    }
}
