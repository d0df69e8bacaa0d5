//! Compiles the news protobuf contract.
//!
//! The `.proto` files are parsed with `protox`, so building does not need a
//! system `protoc`.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_files = ["proto/news/v1/news.proto"];
    let includes = ["proto"];

    let file_descriptors = protox::compile(proto_files, includes)?;

    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_fds(file_descriptors)?;

    for file in &proto_files {
        println!("cargo:rerun-if-changed={file}");
    }

    Ok(())
}
