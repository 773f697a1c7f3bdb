mod utf8_chunk_decoder;

pub use utf8_chunk_decoder::Utf8ChunkDecoder;
