// Test programs are given line by line as hex strings of the statement bytes.
// The link and terminator bytes are supplied by `image`, starting at $801.

use super::tokenizer::Tokenizer;
use super::diagnostics::Anomaly;
use super::{Program,FragmentKind,JumpKind};

/// Build a program image from (line number, statement bytes)
pub fn image_bytes(lines: &[(u16,Vec<u8>)]) -> Vec<u8> {
    let mut ans = Vec::new();
    let mut addr: u16 = 0x801;
    for (num,body) in lines {
        let next = addr + body.len() as u16 + 5;
        ans.append(&mut u16::to_le_bytes(next).to_vec());
        ans.append(&mut u16::to_le_bytes(*num).to_vec());
        ans.append(&mut body.clone());
        ans.push(0);
        addr = next;
    }
    ans.append(&mut vec![0,0]);
    ans
}

/// Build a program image from (line number, hex string of statement bytes)
pub fn image(lines: &[(u16,&str)]) -> Vec<u8> {
    let v: Vec<(u16,Vec<u8>)> = lines.iter().map(|(num,hex_body)| {
        (*num,hex::decode(hex_body).expect("hex error"))
    }).collect();
    image_bytes(&v)
}

pub fn decode(lines: &[(u16,&str)]) -> Program {
    let mut tokenizer = Tokenizer::new();
    tokenizer.detokenize(&image(lines))
}

fn kinds(program: &Program, line: usize) -> Vec<FragmentKind> {
    program.lines[line].fragments.iter().map(|f| f.kind).collect()
}

fn anomalies(program: &Program) -> Vec<Anomaly> {
    program.diagnostics.iter().map(|d| d.anomaly.clone()).collect()
}

mod fragments {
    use super::*;
    #[test]
    fn for_next() {
        // 10 FOR I = 1 TO 5:NEXT I
        let program = decode(&[(10,"8149d031c1353a8249")]);
        assert_eq!(program.lines.len(),1);
        assert_eq!(kinds(&program,0),vec![FragmentKind::For,FragmentKind::Next]);
        let frags = &program.lines[0].fragments;
        assert_eq!(frags[0].for_variable,"I");
        assert_eq!(frags[1].next_variables,vec!["I"]);
        assert_eq!((frags[0].start,frags[0].end),(4,11));
        assert_eq!((frags[1].start,frags[1].end),(11,13));
        assert_eq!(frags[0].body.len(),6);
        assert_eq!(program.lines[0].end,14);
        assert_eq!(program.end_of_program(),14);
        assert!(program.diagnostics.is_empty());
    }
    #[test]
    fn spans_cover_the_line() {
        // 10 PRINT "HI:":PRINT "X"::A = 1
        let program = decode(&[(10,"ba2248493a223aba2258223a3a41d031")]);
        let frags = &program.lines[0].fragments;
        assert_eq!(frags[0].start,4);
        for i in 1..frags.len() {
            assert_eq!(frags[i].start,frags[i-1].end);
        }
        assert_eq!(frags.last().unwrap().end,program.lines[0].end - 1);
        assert_eq!(kinds(&program,0),vec![FragmentKind::Print,FragmentKind::Print,FragmentKind::Empty,FragmentKind::Let]);
    }
    #[test]
    fn naked_next() {
        // 10 NEXT : NEXT J,I
        let program = decode(&[(10,"823a824a2c49")]);
        let frags = &program.lines[0].fragments;
        assert_eq!(frags[0].next_variables.len(),0);
        assert_eq!(frags[1].next_variables,vec!["J","I"]);
    }
    #[test]
    fn assignment_positions() {
        // 10 LET A = 1:BB = 2:PRINT
        let program = decode(&[(10,"aa41d0313a4242d0323aba")]);
        let frags = &program.lines[0].fragments;
        assert_eq!(kinds(&program,0),vec![FragmentKind::Let,FragmentKind::Let,FragmentKind::Print]);
        assert_eq!(frags[0].assign_pos,6);
        assert_eq!(frags[1].assign_pos,3);
        assert_eq!(frags[2].assign_pos,0);
    }
}

mod conditionals {
    use super::*;
    #[test]
    fn if_then_goto() {
        // 10 IF X = 1 THEN GOTO 20
        let program = decode(&[(10,"ad58d031c4ab3230")]);
        assert_eq!(kinds(&program,0),vec![FragmentKind::If,FragmentKind::Goto]);
        assert_eq!(program.lines[0].fragments[0].body.last(),Some(&super::super::TOK_THEN));
        assert_eq!(program.symbols.gotos[&20],vec![10]);
    }
    #[test]
    fn if_goto() {
        // 10 IF X GOTO 20
        let program = decode(&[(10,"ad58ab3230")]);
        assert_eq!(kinds(&program,0),vec![FragmentKind::If,FragmentKind::Goto]);
        assert_eq!(program.lines[0].fragments[0].body,vec![0xad,0x58]);
        assert_eq!(program.symbols.gotos[&20],vec![10]);
    }
    #[test]
    fn implied_goto() {
        // 10 IF X THEN 100
        let program = decode(&[(10,"ad58c4313030")]);
        assert_eq!(kinds(&program,0),vec![FragmentKind::If,FragmentKind::ImpliedGoto]);
        assert_eq!(program.symbols.gotos[&100],vec![10]);
    }
    #[test]
    fn then_inside_string() {
        // 10 IF A$ = "THEN" THEN PRINT
        let program = decode(&[(10,"ad4124d0225448454e22c4ba")]);
        assert_eq!(kinds(&program,0),vec![FragmentKind::If,FragmentKind::Print]);
    }
    #[test]
    fn if_without_then() {
        // 10 IF X:PRINT
        let program = decode(&[(10,"ad583aba")]);
        assert_eq!(kinds(&program,0),vec![FragmentKind::If,FragmentKind::Print]);
        assert_eq!(anomalies(&program),vec![Anomaly::IfWithoutThen]);
        assert_eq!(program.diagnostics[0].line,10);
    }
}

mod remarks {
    use super::*;
    #[test]
    fn rem_absorbs_line() {
        // 10 REM A:B=1
        let program = decode(&[(10,"b2413a42d031")]);
        assert_eq!(kinds(&program,0),vec![FragmentKind::Rem]);
        assert_eq!(program.symbols.variables.len(),0);
    }
    #[test]
    fn mid_line_rem() {
        // 10 PRINT 1 REM HI:A
        let program = decode(&[(10,"ba31b248493a41")]);
        assert_eq!(kinds(&program,0),vec![FragmentKind::Print,FragmentKind::Rem]);
        assert_eq!(program.lines[0].fragments[0].body,vec![0xba,0x31]);
        assert_eq!(anomalies(&program),vec![Anomaly::MidLineRem]);
        assert!(!program.symbols.variables.contains_key("A"));
    }
    #[test]
    fn data_has_no_variables() {
        // 10 DATA A,B
        let program = decode(&[(10,"83412c42")]);
        assert_eq!(kinds(&program,0),vec![FragmentKind::Data]);
        assert_eq!(program.symbols.variables.len(),0);
    }
}

mod cross_references {
    use super::*;
    #[test]
    fn on_goto() {
        // 10 ON X GOTO 20,30,40
        let program = decode(&[(10,"b458ab32302c33302c3430")]);
        let frag = &program.lines[0].fragments[0];
        assert_eq!(frag.kind,FragmentKind::On);
        assert_eq!(frag.on_expression,"X");
        assert_eq!(frag.on_jump,Some(JumpKind::Goto));
        let targets: Vec<u16> = program.symbols.gotos.keys().cloned().collect();
        assert_eq!(targets,vec![20,30,40]);
        for t in targets {
            assert_eq!(program.symbols.gotos[&t],vec![10]);
        }
    }
    #[test]
    fn on_gosub_expression() {
        // 10 ON INT(X) GOSUB 100
        let program = decode(&[(10,"b4d3285829b0313030")]);
        let frag = &program.lines[0].fragments[0];
        assert_eq!(frag.on_expression,"INT(X)");
        assert_eq!(frag.jump(),Some(JumpKind::Gosub));
        assert_eq!(program.symbols.gosubs[&100],vec![10]);
    }
    #[test]
    fn bad_on_targets() {
        // 10 ON X GOTO 20,A
        let program = decode(&[(10,"b458ab32302c41")]);
        assert_eq!(program.symbols.gotos[&20],vec![10]);
        assert_eq!(anomalies(&program),vec![Anomaly::BadOnTarget("A".to_string())]);
        // 20 ON X
        let program = decode(&[(20,"b458")]);
        assert_eq!(anomalies(&program),vec![Anomaly::OnWithoutTarget]);
        assert_eq!(program.lines[0].fragments[0].jump(),None);
    }
    #[test]
    fn repeated_reference() {
        // 10 GOSUB 100:GOSUB 100
        // 20 GOSUB 100
        let program = decode(&[(10,"b03130303ab0313030"),(20,"b0313030")]);
        assert_eq!(program.symbols.gosubs[&100],vec![10,20]);
    }
    #[test]
    fn missing_target() {
        // 10 GOTO
        let program = decode(&[(10,"ab")]);
        assert_eq!(program.symbols.gotos.len(),0);
        assert_eq!(anomalies(&program),vec![Anomaly::MissingTarget("GOTO".to_string())]);
    }
}

mod symbols {
    use super::*;
    #[test]
    fn variables_and_collisions() {
        // 10 A = 1:AB$(2) = B
        // 20 ABC = AB
        let program = decode(&[(10,"41d0313a414224283229d042"),(20,"414243d04142")]);
        let sym = &program.symbols;
        let names: Vec<&String> = sym.variables.keys().collect();
        assert_eq!(names,vec!["A","AB","AB$(","ABC","B"]);
        assert_eq!(sym.variables["A"],vec![10]);
        assert_eq!(sym.variables["AB"],vec![20]);
        assert_eq!(sym.collisions["AB"],vec!["ABC","AB"]);
        assert_eq!(sym.non_unique().count(),1);
    }
    #[test]
    fn one_entry_per_line() {
        // 10 X = X + X
        // 20 X = 1
        let program = decode(&[(10,"58d058c858"),(20,"58d031")]);
        assert_eq!(program.symbols.variables["X"],vec![10,20]);
    }
    #[test]
    fn strings() {
        // 10 PRINT "HI:":PRINT "X"
        let program = decode(&[(10,"ba2248493a223aba225822")]);
        assert_eq!(program.symbols.strings,vec![
            (10,"\"HI:\"".to_string()),
            (10,"\"X\"".to_string())
        ]);
        assert_eq!(program.symbols.variables.len(),0);
    }
    #[test]
    fn unterminated_string() {
        // 10 PRINT "AB
        let program = decode(&[(10,"ba224142")]);
        assert_eq!(program.symbols.strings,vec![(10,"\"AB".to_string())]);
    }
}

mod structure {
    use super::*;
    #[test]
    fn stops_at_non_increasing_link() {
        let mut img = image(&[(10,"80"),(20,"80")]);
        // point the second link backwards
        img[6] = 0x01;
        img[7] = 0x08;
        let program = Tokenizer::new().detokenize(&img);
        assert_eq!(program.lines.len(),1);
        assert_eq!(program.end_of_program(),6);
    }
    #[test]
    fn short_buffers() {
        for img in [vec![],vec![0x01],vec![0x07,0x08,0x0a,0x00,0x80]] {
            let program = Tokenizer::new().detokenize(&img);
            assert_eq!(program.lines.len(),0);
        }
    }
    #[test]
    fn unterminated_line() {
        let img = vec![0x08,0x08,0x0a,0x00,0xba,0x31,0x32];
        let program = Tokenizer::new().detokenize(&img);
        assert_eq!(program.lines.len(),1);
        assert_eq!(program.lines[0].end,7);
        assert_eq!(anomalies(&program),vec![Anomaly::UnterminatedLine]);
    }
    #[test]
    fn load_address() {
        let img = image(&[(10,"8149d031c1353a8249")]);
        assert_eq!(super::super::deduce_address(&img),Some(0x801));
        assert_eq!(super::super::deduce_address(&[0x01]),None);
        assert_eq!(super::super::deduce_address(&[0x00,0x00]),Some(0));
    }
    #[test]
    fn extra_data() {
        let mut img = image(&[(10,"80")]);
        let program = Tokenizer::new().detokenize(&img);
        assert_eq!(program.extra_data(),None);
        img.push(0x11);
        let program = Tokenizer::new().detokenize(&img);
        assert_eq!(program.extra_data(),None);
        img.push(0x22);
        let program = Tokenizer::new().detokenize(&img);
        assert_eq!(program.extra_data(),Some(8));
    }
}
