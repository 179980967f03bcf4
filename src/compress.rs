//! Gzip encoding and the "is it worth it" decision.
//!
//! Compression is paid for once, at build time. Whether a file is then
//! *served* compressed comes down to packets, not bytes: if gzip does not
//! save at least one whole TCP segment, the client gets the plain bytes and
//! nobody spends CPU inflating them.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Typical payload of one TCP segment (1500 MTU − IP and TCP headers).
pub const TCP_PACKET_DATA_SIZE: usize = 1460;

/// Media types whose encoding already compresses.
///
/// Gzipping these again burns CPU for nothing. Extend as needed.
pub const ALREADY_COMPRESSED: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/avif",
    "audio/mpeg",
    "video/mp4",
    "video/mpeg",
    "application/zip",
    "application/gzip",
    "font/woff",
    "font/woff2",
];

/// Gzip `data` at the best compression level.
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

/// `true` when the compressed form occupies fewer whole packets than the plain
/// form.
///
/// Integer division on purpose: 1400 → 1200 bytes is zero packets either way
/// and stays plain, 3000 → 2900 drops from two packets to one and compresses.
pub fn saves_packets(plain_size: usize, compressed_size: usize) -> bool {
    plain_size / TCP_PACKET_DATA_SIZE > compressed_size / TCP_PACKET_DATA_SIZE
}

/// `true` if `content_type` is in [`ALREADY_COMPRESSED`].
pub fn is_already_compressed(content_type: &str) -> bool {
    ALREADY_COMPRESSED.contains(&content_type)
}

/// The full build-time decision for one file.
pub fn should_compress(content_type: &str, plain_size: usize, compressed_size: usize) -> bool {
    saves_packets(plain_size, compressed_size) && !is_already_compressed(content_type)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::GzDecoder;

    use super::*;

    #[test]
    fn packet_counts_decide() {
        assert!(saves_packets(3000, 1000));  // 2 vs 0
        assert!(saves_packets(3000, 2900));  // 2 vs 1
        assert!(!saves_packets(1400, 1200)); // 0 vs 0
        assert!(!saves_packets(2919, 1460)); // 1 vs 1
        assert!(saves_packets(2920, 1459));  // 2 vs 0
        assert!(!saves_packets(0, 0));
    }

    #[test]
    fn ten_bytes_across_a_boundary_is_enough() {
        assert!(saves_packets(1465, 1455));
        assert!(!saves_packets(1475, 1465));
    }

    #[test]
    fn precompressed_media_never_compress() {
        assert!(!should_compress("image/png", 100_000, 10));
        assert!(!should_compress("video/mp4", 100_000, 10));
        assert!(should_compress("text/css", 100_000, 10));
        assert!(should_compress("", 100_000, 10));
        assert!(!should_compress("text/css", 1000, 10));
    }

    #[test]
    fn gzip_round_trips() {
        let plain = b"body { margin: 0 }\n".repeat(500);
        let packed = gzip(&plain).unwrap();
        assert!(packed.len() < plain.len());

        let mut unpacked = Vec::new();
        GzDecoder::new(packed.as_slice()).read_to_end(&mut unpacked).unwrap();
        assert_eq!(unpacked, plain);
    }

    #[test]
    fn gzip_of_nothing_is_a_valid_stream() {
        let packed = gzip(b"").unwrap();
        let mut unpacked = Vec::new();
        GzDecoder::new(packed.as_slice()).read_to_end(&mut unpacked).unwrap();
        assert!(unpacked.is_empty());
    }
}
