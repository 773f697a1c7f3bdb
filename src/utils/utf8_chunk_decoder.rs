/// Incremental UTF-8 decoder for byte chunks that may split a multi-byte
/// character at any position.
///
/// Bytes forming the incomplete tail of a chunk are held back and prepended to
/// the next chunk, so decoding never depends on where the transport happened to
/// cut the stream. Invalid sequences are replaced with `U+FFFD` rather than
/// rejected, and counted so callers can report them.
///
/// # Example:
/// ```rust
/// use genai_rpc::utils::Utf8ChunkDecoder;
///
/// let bytes = "añb".as_bytes();
/// let mut decoder = Utf8ChunkDecoder::new();
///
/// let mut text = decoder.decode(&bytes[..2]); // splits 'ñ'
/// text.push_str(&decoder.decode(&bytes[2..]));
///
/// assert_eq!(text, "añb");
/// ```
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>, // Incomplete trailing sequence of the previous chunk
    replacement_count: usize,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes as much of `bytes` (plus any held-back tail) as forms complete
    /// characters.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);

        let mut text = String::with_capacity(input.len());
        let mut rest: &[u8] = &input;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, remainder) = rest.split_at(err.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        Some(invalid_len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            self.replacement_count += 1;
                            rest = &remainder[invalid_len..];
                        }
                        None => {
                            // Unexpected end of input: wait for the next chunk
                            self.pending = remainder.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        text
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Total number of replacement characters emitted so far.
    pub fn replacement_count(&self) -> usize {
        self.replacement_count
    }

    pub fn reset(&mut self) {
        self.pending.clear();
    }
}
