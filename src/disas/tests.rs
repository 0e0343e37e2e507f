use crate::arch::{ DisasError, DisasErrorKind, DisasResult, IOpcodeResolver, NullFlagNames, OpcodeDesc, toy::ToyIsa };
use crate::decode::{ DecodedInstruction, ExtractErrorKind, Stage };
use crate::memory::{ IByteSource, Image, VA };

use super::*;

fn toy() -> Disassembler<ToyIsa, ToyIsa> {
	Disassembler::new(ToyIsa, ToyIsa)
}

// ------------------------------------------------------------------------------------------------
// Round trips through the toy instruction set
// ------------------------------------------------------------------------------------------------

fn decode_one(va: u32, first: u8, sub: Option<u8>, args: &[u32], compact: bool)
-> DecodedInstruction {
	let bytes = ToyIsa.encode(first, sub, args).unwrap();
	let img = Image::new("test", VA(va), bytes.to_vec());
	let inst = toy().disas_instr(&img, VA(va), compact).unwrap();

	assert_eq!(inst.bytes(), &bytes[..]);
	assert_eq!(inst.size(), bytes.len());
	assert_eq!(inst.stage(), Stage::Composed);
	assert!(inst.extract_error().is_none());
	inst
}

fn check(first: u8, args: &[u32], expected: &str) {
	check_at(0x1000, first, args, expected);
}

fn check_at(va: u32, first: u8, args: &[u32], expected: &str) {
	assert_eq!(decode_one(va, first, None, args, false).text(), expected);
}

fn check_compact(va: u32, first: u8, args: &[u32], expected: &str) {
	assert_eq!(decode_one(va, first, None, args, true).text(), expected);
}

fn check_sub(va: u32, first: u8, sub: u8, args: &[u32], expected: &str) {
	assert_eq!(decode_one(va, first, Some(sub), args, false).text(), expected);
}

#[test]
fn bare_opcodes() {
	check(0x00, &[], "NOP");
	check(0x0E, &[], "RET");
	check(0x18, &[], "HALT");
}

#[test]
fn loads() {
	check(0x01, &[0, 0x123456],    "LD A, 0x123456");
	check(0x02, &[2, 0xBEEF],      "LD CD, 0xBEEF");
	check(0x03, &[25, 0x7F],       "LD Z, 0x7F");
	check(0x04, &[4, 0xDEADBEEF],  "LD EFGH, 0xDEADBEEF");
	check(0x05, &[0, 24],          "LD A, (YZA)");
	check(0x07, &[0xABCD, 7],      "LD (0x00ABCD), H");
	check(0x14, &[1, 2],           "ADD B, C");
	check(0x15, &[0, 3, 0x100],    "MEMC (ABC), (DEF), 0x000100");
}

#[test]
fn indexed() {
	check(0x06, &[1, 3, 0x000010],    "LD B, (DEF + 0x000010)");
	check(0x06, &[1, 3, 0xFFFFF0],    "LD B, (DEF -0x000010)");
	check(0x16, &[1, 0xFFFFFB, 4],    "ST (BCD -0x000005), E");
	check(0x16, &[1, 0x000005, 4],    "ST (BCD + 0x000005), E");
}

#[test]
fn floats() {
	check(0x08, &[2, 1.5f32.to_bits()], "LD F2, 1.5");
	check(0x09, &[1, 15],               "ADD F1, F15");
	check(0x17, &[0x1000, 3],           "LD (0x001000), F3");
}

#[test]
fn branches() {
	check(0x0A, &[0x123456],           "JP 0x123456");
	check(0x0B, &[0xFFFFF0],           "JR -16 => 0x000FF0");
	check(0x0C, &[0x000020],           "CALLR +32 => 0x001020");
	check(0x0D, &[0, 0x000010],        "JR Z, +16 => 0x001010");
	check(0x0D, &[11, 0],              "JR NV, +0 => 0x001000");

	// relative targets wrap around the address space.
	check_at(0x000010, 0x0B, &[0xFFFFE0], "JR -32 => 0xFFFFF0");
	check_at(0xFFFFF0, 0x0B, &[0x000020], "JR +32 => 0x000010");
}

#[test]
fn branches_compact() {
	check_compact(0x1000, 0x0B, &[0xFFFFF0], "JR 0x000FF0");
	check_compact(0x1000, 0x0C, &[0x000020], "CALLR 0x001020");
	check_compact(0x1000, 0x0D, &[1, 0x10],  "JR NZ, 0x001010");
	// compact only affects relative numbers.
	check_compact(0x1000, 0x0F, &[0, 0xFF],  "SADD A, -0x01");
}

#[test]
fn control_targets() {
	let inst = decode_one(0x1000, 0x0D, None, &[0, 0xFFFFF0], false);
	assert!(inst.is_relative());
	assert_eq!(inst.control_target(), Some(VA(0x000FF0)));

	let inst = decode_one(0x1000, 0x0A, None, &[0x123456], false);
	assert!(!inst.is_relative());
	assert_eq!(inst.control_target(), None);
}

#[test]
fn signed_arithmetic() {
	check(0x0F, &[0, 0xFF],            "SADD A, -0x01");
	check(0x0F, &[0, 0x7F],            "SADD A, 0x7F");
	check(0x10, &[0, 5],               "SADD AB, 0x0005");
	check(0x11, &[3, 0xFFFFFE],        "SSUB DEF, -0x000002");
	check(0x12, &[0, 0x80000000],      "SMUL ABCD, -0x80000000");
	check(0x13, &[2, 0x1FFF],          "SCP C, -0x0001");
	check(0x13, &[2, 0x0FFF],          "SCP C, 0x0FFF");
	check(0x13, &[2, 0x1000],          "SCP C, -0x1000");
}

#[test]
fn grouped() {
	check_sub(0x1000, 0x20, 0, &[3, 4],       "ADD D, E");
	check_sub(0x1000, 0x20, 1, &[3, 4],       "SUB D, E");
	check_sub(0x1000, 0x20, 2, &[0, 25],      "AND A, Z");
	check_sub(0x1000, 0x20, 3, &[6, 0x1234],  "ADD GH, 0x1234");
	check_sub(0x1000, 0x20, 4, &[1, 0x80],    "SDIV B, -0x80");
	check_sub(0x1000, 0x21, 0, &[2, 0xFFF000], "CALLR C, -4096 => 0x000000");
}

#[test]
fn grouped_relative_comes_from_group() {
	// the ALU group isn't relative, even though nothing in the secondary says so.
	let inst = decode_one(0x1000, 0x20, Some(3), &[0, 0x10], false);
	assert!(!inst.is_relative());

	let inst = decode_one(0x1000, 0x21, Some(0), &[0, 0x10], false);
	assert!(inst.is_relative());
	assert_eq!(inst.mnemonic(), "CALLR f, nnn");
}

#[test]
fn every_instruction_decodes() {
	for (first, sub, desc) in ToyIsa.all_descs() {
		let inst = decode_one(0x1000, first, sub, &[1, 1, 1], false);
		assert_eq!(inst.mnemonic(), desc.mnemonic);
		assert!(!inst.is_illegal());
		assert!(!inst.text().contains('?'), "'{}' gave '{}'", desc.mnemonic, inst.text());
	}
}

// ------------------------------------------------------------------------------------------------
// Runs
// ------------------------------------------------------------------------------------------------

fn texts(insts: &[DecodedInstruction]) -> Vec<&str> {
	insts.iter().map(|i| i.text()).collect()
}

#[test]
fn run_to_end_of_image() {
	let img = Image::new("test", VA(0x1000), vec![0x00, 0x14, 0x01, 0x02, 0xFF, 0x18]);
	let mut dis = toy();
	let insts = dis.run(&img, VA(0x1000), 100, false);

	assert_eq!(texts(&insts), ["NOP", "ADD B, C", "ILLEGAL", "HALT"]);

	let vas: Vec<_> = insts.iter().map(|i| i.va()).collect();
	assert_eq!(vas, [VA(0x1000), VA(0x1001), VA(0x1004), VA(0x1005)]);

	assert!(insts[2].is_illegal());
	assert_eq!(insts[2].size(), 1);
	assert_eq!(insts[2].opcode(), 0xFF);

	assert_eq!(dis.last_error(), Some(DisasError::out_of_bytes(VA(0x1006))));
}

#[test]
fn illegal_resync() {
	// 0x20 0xF8 is group 0x20 with an unknown secondary; decoding picks up again at the
	// byte after it.
	let mut dis = toy();
	let insts = dis.run(&vec![0x20u8, 0xF8, 0x14, 0x01, 0x02], VA(0), 10, false);

	assert_eq!(texts(&insts), ["ILLEGAL", "ILLEGAL", "ADD B, C"]);
	assert_eq!(insts[0].opcode(), 0x20);
	assert_eq!(insts[1].opcode(), 0xF8);
}

#[test]
fn run_count() {
	let nops = vec![0u8; 300];
	let mut dis = toy();

	assert_eq!(dis.run(&nops, VA(0), 3, false).len(), 3);
	assert_eq!(dis.last_error(), None);

	assert_eq!(dis.run(&nops, VA(0), 0, false).len(), 0);
	assert_eq!(dis.last_error(), None);

	assert_eq!(dis.run_with(&nops, VA(0), &DisasConfig::default()).len(), DEFAULT_MAX_COUNT);
	assert_eq!(dis.run_with(&nops, VA(0), &DisasConfig::new().max_count(250)).len(), 250);

	// running out of bytes before the count.
	assert_eq!(dis.run(&nops, VA(290), 100, false).len(), 10);
	assert_eq!(dis.last_error(), Some(DisasError::out_of_bytes(VA(300))));
}

#[test]
fn run_stops_mid_instruction() {
	let mut dis = toy();
	let insts = dis.run(&[0x00u8, 0x01, 0x00][..], VA(0), 10, false);

	assert_eq!(texts(&insts), ["NOP"]);
	assert_eq!(dis.last_error(), Some(DisasError::out_of_bytes(VA(3))));
}

#[test]
fn run_stops_in_group() {
	let img = Image::new("test", VA(0x1000), vec![0x20]);
	let mut dis = toy();

	assert!(dis.run(&img, VA(0x1000), 10, false).is_empty());
	assert_eq!(dis.last_error(), Some(DisasError::out_of_bytes(VA(0x1001))));
}

#[test]
fn run_stops_at_top_of_memory() {
	let img = Image::new("test", VA(0xFFFFFE), vec![0x00; 4]);
	let mut dis = toy();
	let insts = dis.run(&img, VA(0xFFFFFE), 10, false);

	// the bytes at 0 and 1 are never looked at.
	assert_eq!(insts.len(), 2);
	assert_eq!(insts[1].va(), VA(0xFFFFFF));
	assert_eq!(dis.last_error(), None);
}

#[test]
fn instruction_straddles_top_of_memory() {
	let img = Image::new("test", VA(0xFFFFFE), vec![0x14, 0x01, 0x02, 0x00]);
	let mut dis = toy();
	let insts = dis.run(&img, VA(0xFFFFFE), 10, false);

	assert_eq!(texts(&insts), ["ADD B, C"]);
	assert_eq!(insts[0].bytes(), &[0x14, 0x01, 0x02]);
	assert_eq!(insts[0].next_va(), VA(0x000001));
	assert_eq!(dis.last_error(), None);
}

#[test]
fn iterator() {
	let img = Image::new("test", VA(0x1000), vec![0x00, 0x14, 0x01, 0x02, 0x18]);
	let mut dis = toy();
	let mut iter = dis.disas_all(&img, VA(0x1000), false);

	assert_eq!((&mut iter).count(), 3);
	assert!(iter.has_err());
	assert_eq!(iter.va(), VA(0x1005));
	assert_eq!(iter.err(), Some(DisasError::out_of_bytes(VA(0x1005))));
	assert!(iter.next().is_none());
}

/// Memory full of NOPs, except for one address that can't be read.
struct FaultyMemory {
	bad: VA,
}

impl IByteSource for FaultyMemory {
	fn fetch_u8(&self, va: VA) -> DisasResult<u8> {
		if va == self.bad {
			Err(DisasError::memory_fault(va))
		} else {
			Ok(0x00)
		}
	}
}

#[test]
fn memory_fault_stops_run() {
	let mem = FaultyMemory { bad: VA(0x1003) };
	let mut dis = toy();
	let insts = dis.run(&mem, VA(0x1000), 10, false);

	assert_eq!(texts(&insts), ["NOP", "NOP", "NOP"]);

	let err = dis.last_error().unwrap();
	assert_eq!(err, DisasError::memory_fault(VA(0x1003)));
	assert_eq!(err.kind, DisasErrorKind::MemoryFault);
	assert_eq!(err.to_string(), "disassembly error at VA 0x001003: memory fault");

	// the fault is only fatal if the run gets that far.
	assert_eq!(dis.run(&mem, VA(0x1004), 10, false).len(), 10);
	assert_eq!(dis.last_error(), None);
}

#[test]
fn errors_are_cleared() {
	let mut dis = toy();
	let img = Image::new("test", VA(0), vec![0x00]);

	dis.run(&img, VA(0), 10, false);
	assert!(dis.last_error().is_some());

	dis.run(&img, VA(0), 1, false);
	assert!(dis.last_error().is_none());
}

// ------------------------------------------------------------------------------------------------
// Bad templates
// ------------------------------------------------------------------------------------------------

/// An opcode table with a typo in it.
struct BadIsa;

impl IOpcodeResolver for BadIsa {
	fn resolve_primary(&self, first: u8) -> Option<OpcodeDesc> {
		match first {
			0x01 => Some(OpcodeDesc::new("LD r, r", "AAAAAAAA BBBBBXBB", 0x01)),
			_    => None,
		}
	}

	fn resolve_secondary(&self, _first: u8, _second: u8) -> Option<OpcodeDesc> {
		None
	}

	fn is_single_byte(&self, _first: u8) -> bool {
		true
	}
}

#[test]
fn bad_template_does_not_stop_run() {
	let mut dis = Disassembler::new(BadIsa, NullFlagNames);
	let insts = dis.run(&vec![0x01u8, 0x02, 0xFF, 0x01, 0x03, 0x00], VA(0), 10, false);

	// 31 isn't a register.
	assert_eq!(texts(&insts), ["LD C, ?", "LD D, A"]);
	assert_eq!(insts[0].size(), 3);
	assert_eq!(insts[1].va(), VA(3));

	let err = insts[0].extract_error().unwrap();
	assert_eq!(err.kind, ExtractErrorKind::BadTemplateChar('X'));
	assert_eq!(err.pos, 13);

	assert_eq!(dis.last_error(), Some(DisasError::out_of_bytes(VA(6))));
}

// ------------------------------------------------------------------------------------------------
// Shape cache
// ------------------------------------------------------------------------------------------------

#[test]
fn shapes_are_shared() {
	let mut dis = toy();
	let insts = dis.run(&vec![0x14u8, 0x01, 0x02, 0x14, 0x03, 0x04, 0x00, 0xFF], VA(0), 10, false);

	assert_eq!(texts(&insts), ["ADD B, C", "ADD D, E", "NOP", "ILLEGAL"]);
	// illegal instructions don't go through the cache.
	assert_eq!(dis.cache().len(), (2, 2));

	// secondary "ADD r, r" has a different template but the same mnemonic.
	dis.run(&vec![0x20u8, 0x00, 0x44], VA(0), 1, false);
	assert_eq!(dis.cache().len(), (3, 2));
}

#[test]
fn cache_clear() {
	let mut cache = ShapeCache::new();
	let a = cache.layout("AAAAAAAA");
	let b = cache.layout("AAAAAAAA");
	assert!(std::sync::Arc::ptr_eq(&a, &b));

	cache.syntax("NOP");
	assert_eq!(cache.len(), (1, 1));

	cache.clear();
	assert_eq!(cache.len(), (0, 0));
	assert!(!std::sync::Arc::ptr_eq(&a, &cache.layout("AAAAAAAA")));
}

// ------------------------------------------------------------------------------------------------
// Listings
// ------------------------------------------------------------------------------------------------

fn listing_run() -> Vec<DecodedInstruction> {
	let img = Image::new("test", VA(0x1000), vec![0x14, 0x01, 0x02, 0x18]);
	toy().run(&img, VA(0x1000), 10, false)
}

#[test]
fn listing_lines() {
	let insts = listing_run();
	let add = &insts[0];

	assert_eq!(TextOnly.fmt_line(add),      "ADD B, C");
	assert_eq!(AddrText.fmt_line(add),      "001000: ADD B, C");
	assert_eq!(AddrBytesText.fmt_line(add), "001000|14 01 02|ADD B, C");
	assert_eq!(AddrBytesText.fmt_line(&insts[1]), "001003|18|HALT");
}

#[test]
fn listing_styles() {
	let insts = listing_run();

	assert_eq!(StyleName::Text.style().fmt_listing(&insts),  "ADD B, C\nHALT");
	assert_eq!(StyleName::Addr.style().fmt_listing(&insts),  "001000: ADD B, C\n001003: HALT");
	assert_eq!(StyleName::Bytes.style().fmt_listing(&insts),
		"001000|14 01 02|ADD B, C\n001003|18|HALT");
	assert_eq!(StyleName::Text.style().fmt_listing(&[]), "");
}

#[test]
fn style_names() {
	assert_eq!("text".parse::<StyleName>().unwrap(),  StyleName::Text);
	assert_eq!("addr".parse::<StyleName>().unwrap(),  StyleName::Addr);
	assert_eq!("bytes".parse::<StyleName>().unwrap(), StyleName::Bytes);
	assert!("Bytes".parse::<StyleName>().is_err());
	assert_eq!(StyleName::Addr.to_string(), "addr");
	assert_eq!(StyleName::Addr.style(), ListingStyle::from(AddrText));
}

#[test]
fn config() {
	let config = DisasConfig::default();
	assert_eq!(config.max_count, 200);
	assert!(!config.compact);
	assert_eq!(config.style, StyleName::Bytes);
	assert_eq!(config.listing_style(), ListingStyle::from(AddrBytesText));

	let config = DisasConfig::new().max_count(5).compact(true).style(StyleName::Text);
	assert_eq!(config, DisasConfig { max_count: 5, compact: true, style: StyleName::Text });
}

#[test]
fn bytes() {
	assert_eq!(fmt_bytes(&[]), "");
	assert_eq!(fmt_bytes(&[0x0A]), "0A");
	assert_eq!(fmt_bytes(&[0xDE, 0xAD, 0x00]), "DE AD 00");
}
