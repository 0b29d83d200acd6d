fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/profile.proto");
    println!("cargo:rerun-if-changed=proto/auth.proto");

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/profile.proto", "proto/auth.proto"], &["proto"])?;

    Ok(())
}
