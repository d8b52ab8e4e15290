//! Table of the legal 6502 operations.
//!
//! Each entry is (opcode, mnemonic, operand snippet).  The digit in the snippet is the
//! number of operand bytes, and is replaced by the value when disassembling.
//! An empty snippet means the operation is implied or acts on the accumulator.

pub const OPCODES: &[(u8,&str,&str)] = &[
    (0x69,"ADC","#1"),(0x65,"ADC","1"),(0x75,"ADC","1,X"),(0x6d,"ADC","2"),
    (0x7d,"ADC","2,X"),(0x79,"ADC","2,Y"),(0x61,"ADC","(1,X)"),(0x71,"ADC","(1),Y"),
    (0x29,"AND","#1"),(0x25,"AND","1"),(0x35,"AND","1,X"),(0x2d,"AND","2"),
    (0x3d,"AND","2,X"),(0x39,"AND","2,Y"),(0x21,"AND","(1,X)"),(0x31,"AND","(1),Y"),
    (0x0a,"ASL",""),(0x06,"ASL","1"),(0x16,"ASL","1,X"),(0x0e,"ASL","2"),(0x1e,"ASL","2,X"),
    (0x90,"BCC","1"),(0xb0,"BCS","1"),(0xf0,"BEQ","1"),(0x30,"BMI","1"),
    (0xd0,"BNE","1"),(0x10,"BPL","1"),(0x50,"BVC","1"),(0x70,"BVS","1"),
    (0x24,"BIT","1"),(0x2c,"BIT","2"),
    (0x00,"BRK",""),
    (0x18,"CLC",""),(0xd8,"CLD",""),(0x58,"CLI",""),(0xb8,"CLV",""),
    (0xc9,"CMP","#1"),(0xc5,"CMP","1"),(0xd5,"CMP","1,X"),(0xcd,"CMP","2"),
    (0xdd,"CMP","2,X"),(0xd9,"CMP","2,Y"),(0xc1,"CMP","(1,X)"),(0xd1,"CMP","(1),Y"),
    (0xe0,"CPX","#1"),(0xe4,"CPX","1"),(0xec,"CPX","2"),
    (0xc0,"CPY","#1"),(0xc4,"CPY","1"),(0xcc,"CPY","2"),
    (0xc6,"DEC","1"),(0xd6,"DEC","1,X"),(0xce,"DEC","2"),(0xde,"DEC","2,X"),
    (0xca,"DEX",""),(0x88,"DEY",""),
    (0x49,"EOR","#1"),(0x45,"EOR","1"),(0x55,"EOR","1,X"),(0x4d,"EOR","2"),
    (0x5d,"EOR","2,X"),(0x59,"EOR","2,Y"),(0x41,"EOR","(1,X)"),(0x51,"EOR","(1),Y"),
    (0xe6,"INC","1"),(0xf6,"INC","1,X"),(0xee,"INC","2"),(0xfe,"INC","2,X"),
    (0xe8,"INX",""),(0xc8,"INY",""),
    (0x4c,"JMP","2"),(0x6c,"JMP","(2)"),
    (0x20,"JSR","2"),
    (0xa9,"LDA","#1"),(0xa5,"LDA","1"),(0xb5,"LDA","1,X"),(0xad,"LDA","2"),
    (0xbd,"LDA","2,X"),(0xb9,"LDA","2,Y"),(0xa1,"LDA","(1,X)"),(0xb1,"LDA","(1),Y"),
    (0xa2,"LDX","#1"),(0xa6,"LDX","1"),(0xb6,"LDX","1,Y"),(0xae,"LDX","2"),(0xbe,"LDX","2,Y"),
    (0xa0,"LDY","#1"),(0xa4,"LDY","1"),(0xb4,"LDY","1,X"),(0xac,"LDY","2"),(0xbc,"LDY","2,X"),
    (0x4a,"LSR",""),(0x46,"LSR","1"),(0x56,"LSR","1,X"),(0x4e,"LSR","2"),(0x5e,"LSR","2,X"),
    (0xea,"NOP",""),
    (0x09,"ORA","#1"),(0x05,"ORA","1"),(0x15,"ORA","1,X"),(0x0d,"ORA","2"),
    (0x1d,"ORA","2,X"),(0x19,"ORA","2,Y"),(0x01,"ORA","(1,X)"),(0x11,"ORA","(1),Y"),
    (0x48,"PHA",""),(0x08,"PHP",""),(0x68,"PLA",""),(0x28,"PLP",""),
    (0x2a,"ROL",""),(0x26,"ROL","1"),(0x36,"ROL","1,X"),(0x2e,"ROL","2"),(0x3e,"ROL","2,X"),
    (0x6a,"ROR",""),(0x66,"ROR","1"),(0x76,"ROR","1,X"),(0x6e,"ROR","2"),(0x7e,"ROR","2,X"),
    (0x40,"RTI",""),(0x60,"RTS",""),
    (0xe9,"SBC","#1"),(0xe5,"SBC","1"),(0xf5,"SBC","1,X"),(0xed,"SBC","2"),
    (0xfd,"SBC","2,X"),(0xf9,"SBC","2,Y"),(0xe1,"SBC","(1,X)"),(0xf1,"SBC","(1),Y"),
    (0x38,"SEC",""),(0xf8,"SED",""),(0x78,"SEI",""),
    (0x85,"STA","1"),(0x95,"STA","1,X"),(0x8d,"STA","2"),(0x9d,"STA","2,X"),
    (0x99,"STA","2,Y"),(0x81,"STA","(1,X)"),(0x91,"STA","(1),Y"),
    (0x86,"STX","1"),(0x96,"STX","1,Y"),(0x8e,"STX","2"),
    (0x84,"STY","1"),(0x94,"STY","1,X"),(0x8c,"STY","2"),
    (0xaa,"TAX",""),(0xa8,"TAY",""),(0xba,"TSX",""),(0x8a,"TXA",""),(0x9a,"TXS",""),(0x98,"TYA","")
];

const BRANCHES: [&str;8] = ["BCC","BCS","BEQ","BMI","BNE","BPL","BVC","BVS"];

pub fn is_relative(mnemonic: &str) -> bool {
    BRANCHES.contains(&mnemonic)
}

#[test]
fn table_is_complete() {
    assert_eq!(OPCODES.len(),151);
    let mut seen = std::collections::HashSet::new();
    for (op,_,_) in OPCODES {
        assert!(seen.insert(*op),"duplicate opcode {:02X}",op);
    }
}
