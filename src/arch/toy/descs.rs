
// ------------------------------------------------------------------------------------------------
// ToyDesc
// ------------------------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(super) struct ToyDesc {
	pub(super) opcode:   u8,
	/// secondary opcode (top bits of the second byte), for grouped instructions.
	pub(super) sub:      Option<u8>,
	pub(super) mnemonic: &'static str,
	pub(super) template: &'static str,
}

#[allow(non_snake_case)]
const fn Op(opcode: u8, mnemonic: &'static str, template: &'static str) -> ToyDesc {
	ToyDesc { opcode, sub: None, mnemonic, template }
}

#[allow(non_snake_case)]
const fn Sub(opcode: u8, sub: u8, mnemonic: &'static str, template: &'static str) -> ToyDesc {
	ToyDesc { opcode, sub: Some(sub), mnemonic, template }
}

/// How far to shift the second byte right to get the secondary opcode (it's the top 5 bits).
pub(super) const SUB_SHIFT: u32 = 3;

// ------------------------------------------------------------------------------------------------
// Tables
// ------------------------------------------------------------------------------------------------

pub(super) const PRIMARY_DESCS: &[ToyDesc] = &[
	Op(0x00, "NOP",                    ""),
	Op(0x01, "LD r, nnn",              "AAAAAuuu BBBBBBBB BBBBBBBB BBBBBBBB"),
	Op(0x02, "LD rr, nn",              "AAAAAuuu BBBBBBBB BBBBBBBB"),
	Op(0x03, "LD r, n",                "AAAAAuuu BBBBBBBB"),
	Op(0x04, "LD rrrr, nnnn",          "AAAAAuuu BBBBBBBB BBBBBBBB BBBBBBBB BBBBBBBB"),
	Op(0x05, "LD r, (rrr)",            "AAAAABBB BBuuuuuu"),
	Op(0x06, "LD r, (rrr, nnn)",       "AAAAABBB BBuuuuuu CCCCCCCC CCCCCCCC CCCCCCCC"),
	Op(0x07, "LD (nnn), r",            "AAAAAAAA AAAAAAAA AAAAAAAA BBBBBuuu"),
	Op(0x08, "LD fr, nnnn",            "AAAAuuuu BBBBBBBB BBBBBBBB BBBBBBBB BBBBBBBB"),
	Op(0x09, "ADD fr, fr",             "AAAABBBB"),
	Op(0x0A, "JP nnn",                 "AAAAAAAA AAAAAAAA AAAAAAAA"),
	Op(0x0B, "JR nnn",                 "AAAAAAAA AAAAAAAA AAAAAAAA"),
	Op(0x0C, "CALLR nnn",              "AAAAAAAA AAAAAAAA AAAAAAAA"),
	Op(0x0D, "JR f, nnn",              "AAAAAAAA BBBBBBBB BBBBBBBB BBBBBBBB"),
	Op(0x0E, "RET",                    ""),
	Op(0x0F, "SADD r, n",              "AAAAAuuu BBBBBBBB"),
	Op(0x10, "SADD rr, nn",            "AAAAAuuu BBBBBBBB BBBBBBBB"),
	Op(0x11, "SSUB rrr, nnn",          "AAAAAuuu BBBBBBBB BBBBBBBB BBBBBBBB"),
	Op(0x12, "SMUL rrrr, nnnn",        "AAAAAuuu BBBBBBBB BBBBBBBB BBBBBBBB BBBBBBBB"),
	Op(0x13, "SCP r, nn",              "AAAAAuuu uuuBBBBB BBBBBBBB"),
	Op(0x14, "ADD r, r",               "AAAAAAAA BBBBBBBB"),
	Op(0x15, "MEMC (rrr), (rrr), nnn", "AAAAABBB BBuuuuuu CCCCCCCC CCCCCCCC CCCCCCCC"),
	Op(0x16, "ST (rrr, nnn), r",       "AAAAABBB BBBBBBBB BBBBBBBB BBBBBCCC CCuuuuuu"),
	Op(0x17, "LD (nnn), fr",           "AAAAAAAA AAAAAAAA AAAAAAAA BBBB1111"),
	Op(0x18, "HALT",                   ""),
];

/// Grouped opcodes: the first byte only says which group, and names it.
pub(super) const GROUPS: &[ToyDesc] = &[
	Op(0x20, "ALU",   ""),
	Op(0x21, "CALLR", ""),
];

pub(super) const SECONDARY_DESCS: &[ToyDesc] = &[
	Sub(0x20, 0, "ADD r, r",     "oooooAAA AABBBBBu"),
	Sub(0x20, 1, "SUB r, r",     "oooooAAA AABBBBBu"),
	Sub(0x20, 2, "AND r, r",     "oooooAAA AABBBBBu"),
	Sub(0x20, 3, "ADD rr, nn",   "oooooAAA AAuuuuuu BBBBBBBB BBBBBBBB"),
	Sub(0x20, 4, "SDIV r, n",    "oooooAAA AAuuuuuu BBBBBBBB"),
	Sub(0x21, 0, "CALLR f, nnn", "oooooAAA BBBBBBBB BBBBBBBB BBBBBBBB"),
];

/// Condition flag names, indexed by flag number.
pub(super) const FLAG_NAMES: &[&str] = &[
	"Z", "NZ", "C", "NC", "EQ", "NE", "GT", "GTE", "LT", "LTE", "V", "NV",
];
