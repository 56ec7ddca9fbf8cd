use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lc3asm::assembler;

// One sort pass over a table, exercising every opcode and data directive.
const BUBBLE_PASS: &str = "\
        .ORIG x3000
        LEA R0, TABLE
        LD R1, COUNT
PASS:   ADD R1, R1, #-1
        BRnz END_PASS
        LDR R2, R0, #0
        LDR R3, R0, #1
        NOT R4, R3
        ADD R4, R4, #1
        ADD R4, R2, R4
        BRzp NOSWAP
        STR R3, R0, #0
        STR R2, R0, #1
NOSWAP: ADD R0, R0, #1
        BRnzp PASS
END_PASS: AND R5, R5, #0
COUNT:  .FILL #6
TABLE:  .FILL #9
        .FILL #2
        .FILL #7
        .BLKW #3
MSG:    .STRINGZ \"ok\"
        .END
";

fn assemble_bubble_pass(c: &mut Criterion) {
    c.bench_function("assemble_bubble_pass", |b| {
        b.iter(|| assembler::assemble(black_box(BUBBLE_PASS)).unwrap())
    });
}

criterion_group!(benches, assemble_bubble_pass);
criterion_main!(benches);
