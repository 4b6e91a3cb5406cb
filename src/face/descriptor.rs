use derive_more::Display;

/// Length of a face descriptor produced by the encoding service.
pub const DESCRIPTOR_DIM: usize = 128;

/// Leading byte of the binary column form. Text rows start with a digit, a
/// sign, a dot or whitespace, so they can never carry it.
const BINARY_TAG: u8 = 0x01;

/// Size of the binary column form: tag byte plus the little-endian values.
pub const STORED_LEN: usize = 1 + DESCRIPTOR_DIM * std::mem::size_of::<f64>();

#[derive(Debug, Display, PartialEq)]
pub enum DescriptorError {
    #[display(fmt = "expected {}-dim descriptor, got {}", DESCRIPTOR_DIM, _0)]
    WrongLength(usize),
    #[display(fmt = "descriptor component is not a finite number: {}", _0)]
    BadComponent(String),
    #[display(fmt = "stored descriptor is neither tagged binary nor text")]
    UnknownFormat,
}

impl std::error::Error for DescriptorError {}

/// Face descriptor: a fixed-length vector whose Euclidean distance to another
/// descriptor approximates identity similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor(Vec<f64>);

impl Descriptor {
    pub fn new(values: Vec<f64>) -> Result<Self, DescriptorError> {
        if values.len() != DESCRIPTOR_DIM {
            return Err(DescriptorError::WrongLength(values.len()));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(DescriptorError::BadComponent(bad.to_string()));
        }
        Ok(Self(values))
    }

    pub fn distance(&self, other: &Descriptor) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Binary column form: `BINARY_TAG` followed by `DESCRIPTOR_DIM`
    /// little-endian f64 values.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(STORED_LEN);
        bytes.push(BINARY_TAG);
        bytes.extend(self.0.iter().flat_map(|v| v.to_le_bytes()));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DescriptorError> {
        let Some((&BINARY_TAG, body)) = bytes.split_first() else {
            return Err(DescriptorError::UnknownFormat);
        };
        if body.len() != STORED_LEN - 1 {
            return Err(DescriptorError::WrongLength(body.len() / 8));
        }
        let values = body
            .chunks_exact(8)
            .map(|chunk| {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(chunk);
                f64::from_le_bytes(raw)
            })
            .collect();
        Self::new(values)
    }

    /// Decodes a stored `face_encoding` value. Rows written before the binary
    /// layout hold the comma-joined text form; the tag byte tells them apart.
    pub fn from_stored(bytes: &[u8]) -> Result<Self, DescriptorError> {
        if bytes.first() == Some(&BINARY_TAG) {
            return Self::from_bytes(bytes);
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::parse_text(text),
            Err(_) => Err(DescriptorError::UnknownFormat),
        }
    }

    /// Parses the comma-joined decimal form.
    pub fn parse_text(text: &str) -> Result<Self, DescriptorError> {
        let values = text
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| DescriptorError::BadComponent(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }
}

#[cfg(test)]
pub(crate) fn filled(value: f64) -> Descriptor {
    Descriptor::new(vec![value; DESCRIPTOR_DIM]).unwrap()
}
