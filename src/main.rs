use colored::*;

use tabsimplex::{
    Comp, Constraint, Model, OptDir, Simplex, SimplexConfig, Solution, TableauPrinter,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    //ten variables, two resource constraints
    let mut model = Model::new(OptDir::Max, [3, 2, 4, 1, 5, 2, 3, 1, 6, 7]);
    model.add_constraint(Constraint::new([1; 10], Comp::Le, 10));
    model.add_constraint(Constraint::new([1, 2, 3, 2, 1, 4, 2, 3, 1, 5], Comp::Le, 20));

    println!("model:\n{}", model);

    let mut tableau = model.as_tableau()?;
    let mut printer = TableauPrinter::stdout();
    printer.print("Initial Tableau:", &tableau, None)?;

    let simplex = Simplex::new(SimplexConfig::default());
    let report = simplex.solve_observed(&mut tableau, &mut printer)?;

    println!("{}", "Optimal Solution Found:".green().bold());
    printer.print("Final Tableau:", &tableau, None)?;

    let solution = Solution::for_model(
        &tableau,
        &model,
        report.iterations,
        simplex.config().basis_tolerance(),
    );
    println!("{}", solution);
    Ok(())
}
