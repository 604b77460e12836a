use pretty_assertions::assert_eq;
use superh_rs::disasm::tokens_to_string;
use superh_rs::{ArchError, Architecture, IsaVariant, Token, TokenKind};

fn text(opcode: u16, addr: u32) -> String {
    let arch = Architecture::with_variant(IsaVariant::Sh2e);
    let (len, tokens) = arch.text(opcode.to_be_bytes(), addr).unwrap();
    assert_eq!(len, 2);
    tokens_to_string(&tokens)
}

fn tok(kind: TokenKind, text: &str, value: Option<u32>) -> Token {
    Token { kind, text: text.to_string(), value }
}

#[test]
fn single_register_every_index() {
    for n in 0..16u16 {
        assert_eq!(text(0x4000 | (n << 8), 0), format!("SHLL R{n}"));
        assert_eq!(text(0xF04D | (n << 8), 0), format!("FNEG FR{n}"));
    }
}

#[test]
fn bare_instructions_have_no_trailing_space() {
    let arch = Architecture::default();
    let (_, tokens) = arch.text([0x00, 0x0B], 0).unwrap();
    assert_eq!(tokens, vec![tok(TokenKind::Instruction, "RTS", None)]);
    assert_eq!(text(0x0009, 0), "NOP");
    assert_eq!(text(0x0018, 0), "SETT");
}

#[test]
fn memory_operand_tokens() {
    let arch = Architecture::default();
    let (_, tokens) = arch.text([0x53, 0x21], 0).unwrap();
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Instruction, "MOV.L", None),
            tok(TokenKind::Text, " ", None),
            tok(TokenKind::BeginMemoryOperand, "@", None),
            tok(TokenKind::Text, "(", None),
            tok(TokenKind::Integer, "0x1", Some(1)),
            tok(TokenKind::OperandSeparator, ",", None),
            tok(TokenKind::Register, "R2", Some(2)),
            tok(TokenKind::Text, ")", None),
            tok(TokenKind::OperandSeparator, ",", None),
            tok(TokenKind::Register, "R3", Some(3)),
        ]
    );
}

#[test]
fn operand_layouts() {
    let cases: [(u16, &str); 16] = [
        (0x5321, "MOV.L @(0x1,R2),R3"),
        (0x1231, "MOV.L R3,@(0x1,R2)"),
        (0x8043, "MOV.B R0,@(0x3,R4)"),
        (0x8543, "MOV.W @(0x3,R4),R0"),
        (0x0216, "MOV.L R1,@(R0,R2)"),
        (0x021E, "MOV.L @(R0,R1),R2"),
        (0x2126, "MOV.L R2,@-R1"),
        (0x6126, "MOV.L @R2+,R1"),
        (0x021F, "MAC.L @R1+,@R2+"),
        (0x4F22, "STS.L PR,@-R15"),
        (0x4F26, "LDS.L @R15+,PR"),
        (0x432B, "JMP @R3"),
        (0xC412, "MOV.B @(0x12,GBR),R0"),
        (0xCC01, "TST.B #0x1,@(R0,GBR)"),
        (0xE3FE, "MOV #0xfe,R3"),
        (0xC320, "TRAPA #0x20"),
    ];
    for (opcode, want) in cases {
        assert_eq!(text(opcode, 0), want, "{opcode:#06x}");
    }
}

#[test]
fn fpu_operands() {
    assert_eq!(text(0xF21E, 0), "FMAC FR0,FR1,FR2");
    assert_eq!(text(0x415A, 0), "LDS R1,FPUL");
    assert_eq!(text(0x025A, 0), "STS FPUL,R2");
    assert_eq!(text(0xF31D, 0), "FLDS FR3,FPUL");
    assert_eq!(text(0xF32D, 0), "FLOAT FPUL,FR3");
    assert_eq!(text(0xF128, 0), "FMOV.S @R2,FR1");
    assert_eq!(text(0xF12B, 0), "FMOV.S FR2,@-R1");
}

#[test]
fn pc_relative_operands() {
    assert_eq!(text(0xC701, 0x1002), "MOVA #0x1008,R0");
    assert_eq!(text(0x9301, 0x1002), "MOV.W #0x1008,R3");
    assert_eq!(text(0xD301, 0x1002), "MOV.L #0x1008,R3");
    assert_eq!(text(0x89FF, 0), "BT 0x2");
    assert_eq!(text(0xA001, 0), "BRA 0x6");
    assert_eq!(text(0xB800, 0x1000), "BSR 0x4");
}

#[test]
fn branch_target_token_is_an_address() {
    let arch = Architecture::default();
    let (_, tokens) = arch.text([0xA0, 0x01], 0).unwrap();
    assert_eq!(tokens.last(), Some(&tok(TokenKind::PossibleAddress, "0x6", Some(6))));
}

#[test]
fn unknown_opcode_is_an_error() {
    let arch = Architecture::default();
    assert_eq!(arch.text([0xFF, 0xFF], 0), Err(ArchError::Unrecognized { opcode: 0xFFFF }));
}
