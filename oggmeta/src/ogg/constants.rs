// https://www.xiph.org/ogg/doc/framing.html
pub(crate) const CAPTURE_PATTERN: &str = "OggS";

// https://xiph.org/vorbis/doc/Vorbis_I_spec.html#x1-620004.2.1
pub(crate) const VORBIS_COMMENT_PACKET_TYPE: u8 = 3;
pub(crate) const VORBIS_SIGNATURE: &str = "vorbis";

// https://datatracker.ietf.org/doc/pdf/rfc7845.pdf#section-5.2
pub(crate) const OPUS_LEAD_BYTE: u8 = 79;
pub(crate) const OPUS_SIGNATURE: &str = "pusTags";
