use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    pub base: u32,
    pub bytes: Vec<u8>,
    pub perms: &'static str, // e.g., "r-x"
    pub kind: &'static str,  // e.g., "raw"
}

#[derive(Debug, Clone)]
pub struct Image {
    pub segments: Vec<Segment>,
}

impl Image {
    pub fn from_bytes(base: u32, bytes: Vec<u8>) -> Self {
        let seg = Segment { name: "segment0".into(), base, bytes, perms: "r-x", kind: "raw" };
        Image { segments: vec![seg] }
    }
}

pub fn load_raw_bin(path: &Path, base: u32, skip: usize, len: Option<usize>) -> Result<Image> {
    let file = std::fs::read(path)?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    Ok(Image::from_bytes(base, payload.to_vec()))
}

pub fn read_u8(img: &Image, addr: u32) -> Option<u8> {
    img.segments.iter().find_map(|s| {
        let off = addr.checked_sub(s.base)? as usize;
        s.bytes.get(off).copied()
    })
}

/// Both opcode bytes, most significant first.
pub fn read_opcode(img: &Image, addr: u32) -> Option<[u8; 2]> {
    Some([read_u8(img, addr)?, read_u8(img, addr.wrapping_add(1))?])
}

pub fn read_u16(img: &Image, addr: u32) -> Option<u16> {
    read_opcode(img, addr).map(u16::from_be_bytes)
}

pub fn read_u32(img: &Image, addr: u32) -> Option<u32> {
    let hi = read_u16(img, addr)? as u32;
    let lo = read_u16(img, addr.wrapping_add(2))? as u32;
    Some((hi << 16) | lo)
}

pub fn is_mapped(img: &Image, addr: u32) -> bool {
    read_u8(img, addr).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_maps_skip_and_len() {
        let path = std::env::temp_dir().join("_superh_test_bin.bin");
        std::fs::write(&path, [0u8, 1, 2, 3, 4, 5]).unwrap();
        let img = load_raw_bin(&path, 0x1000_0000, 2, Some(3)).unwrap();
        assert_eq!(img.segments.len(), 1);
        let s = &img.segments[0];
        assert_eq!(s.base, 0x1000_0000);
        assert_eq!(s.bytes, vec![2, 3, 4]);
        assert_eq!(read_u16(&img, 0x1000_0000), Some(0x0203));
        assert!(read_u16(&img, 0x1000_0002).is_none());
        assert!(read_u8(&img, 0x0FFF_FFFF).is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn big_endian_words() {
        let img = Image::from_bytes(0x100, vec![0x12, 0x34, 0x56, 0x78]);
        assert_eq!(read_opcode(&img, 0x100), Some([0x12, 0x34]));
        assert_eq!(read_u32(&img, 0x100), Some(0x1234_5678));
        assert!(is_mapped(&img, 0x103));
        assert!(!is_mapped(&img, 0x104));
    }
}
