//! Builds a tree of student records, prints it, deletes one, prints again.
//!
//! ```text
//! cargo run --example students -- [error|warn|info|debug|trace]
//! ```
use std::{cmp::Ordering, error::Error};

use log::info;
use rbnoir::{Color, Node, Tree};
use simplelog::{Config, LevelFilter, SimpleLogger};

const STUDENTS: i32 = 10;

#[derive(Debug, Clone)]
struct Student {
    num: i32,
    name: String,
}

fn by_num(a: &Student, b: &Student) -> Ordering {
    a.num.cmp(&b.num)
}

fn print_node(node: &Node<Student>) {
    let background = match node.color() {
        Color::Red => 41,
        Color::Black => 40,
    };
    print!("\x1b[;{background}m{:<3}\x1b[0m ", node.value().num);
}

fn main() -> Result<(), Box<dyn Error>> {
    let level = std::env::args()
        .nth(1)
        .map(|l| l.parse::<LevelFilter>())
        .transpose()?
        .unwrap_or(LevelFilter::Info);
    SimpleLogger::init(level, Config::default())?;

    let mut tree = Tree::new();
    for num in 1..=STUDENTS {
        let name = format!("student #{num}");
        tree.insert(Student { num, name }, by_num)?;
    }
    info!("inserted {} students, depth {}", tree.len(), tree.depth());

    tree.traverse_inorder(print_node);
    println!();

    let removed = tree.delete(&7, |num: &i32, s: &Student| num.cmp(&s.num));
    if let Some(student) = removed {
        info!("deleted {} ({})", student.num, student.name);
    }
    tree.traverse_inorder(print_node);
    println!();

    let mut current = 0;
    tree.traverse_levels(|level, node| {
        if level != current {
            println!();
            current = level;
        }
        print_node(node);
    });
    println!();
    Ok(())
}
