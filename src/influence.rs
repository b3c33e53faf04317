//! The influence function: how a unit impulse at one contact perturbs the
//! relative normal velocity at another, through a single shared body.

use crate::body::Body;
use crate::contact::Contact;
use crate::geometry::cross2d;

/// Change in relative normal velocity at `contacts[i]` caused by a unit
/// impulse applied at `contacts[j]` on `body_index`.
///
/// Returns `0.0` if `body_index` is not one of the two bodies referenced by
/// `contacts[i]` or not one of the two referenced by `contacts[j]`, or if the
/// body has infinite mass.
pub fn influence<B: Body>(
    bodies: &[B],
    contacts: &[Contact],
    i: usize,
    j: usize,
    body_index: usize,
) -> f64 {
    let ci = &contacts[i];
    let cj = &contacts[j];

    let r_i = if body_index == ci.primary_body {
        ci.r1
    } else if body_index == ci.normal_body {
        ci.r2
    } else {
        return 0.0;
    };

    let r_j = if body_index == cj.primary_body {
        cj.r1
    } else if body_index == cj.normal_body {
        cj.r2
    } else {
        return 0.0;
    };

    let factor = if body_index == cj.primary_body {
        1.0
    } else {
        -1.0
    };

    let body = &bodies[body_index];
    let m = body.mass();
    if m.is_infinite() {
        return 0.0;
    }
    let inertia = body.moment_about_cm();

    let n_i = ci.normal;
    let n_j = cj.normal;
    let r_j_cross_n_j = cross2d(r_j, n_j);

    let translational_x = n_j.x / m - r_i.y * r_j_cross_n_j / inertia;
    let translational_y = n_j.y / m + r_i.x * r_j_cross_n_j / inertia;

    factor * (n_i.x * translational_x + n_i.y * translational_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{MassProperties, PlanarBody};
    use nalgebra::Vector2;

    fn disk(id: u64, mass: f64, radius: f64) -> PlanarBody {
        PlanarBody::new(id, MassProperties::disk(mass, radius))
    }

    #[test]
    fn self_influence_is_positive_translational_term() {
        let bodies = vec![disk(0, 2.0, 1.0), disk(1, 2.0, 1.0)];
        let contact = Contact::new(
            0,
            1,
            Vector2::new(0.0, -1.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(0.0, 1.0),
            0.0,
            0.0,
            false,
        );
        let contacts = vec![contact];

        // Influence of contact 0 on itself via body 0 (primary) should include
        // the translational term n.n/m = 1/m (the offset is along the normal
        // so the rotational contribution vanishes).
        let value = influence(&bodies, &contacts, 0, 0, 0);
        assert!((value - 1.0 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn infinite_mass_body_contributes_nothing() {
        let bodies = vec![PlanarBody::new_static(0), disk(1, 2.0, 1.0)];
        let contact = Contact::new(
            0,
            1,
            Vector2::new(0.0, -1.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(0.0, 1.0),
            0.0,
            0.0,
            false,
        );
        let contacts = vec![contact];
        assert_eq!(influence(&bodies, &contacts, 0, 0, 0), 0.0);
    }

    #[test]
    fn unrelated_body_contributes_nothing() {
        let bodies = vec![disk(0, 1.0, 1.0), disk(1, 1.0, 1.0), disk(2, 1.0, 1.0)];
        let c0 = Contact::new(
            0,
            1,
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(1.0, 0.0),
            0.0,
            0.0,
            false,
        );
        let c1 = Contact::new(
            1,
            2,
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(1.0, 0.0),
            0.0,
            0.0,
            false,
        );
        let contacts = vec![c0, c1];
        // Body 2 never touches contact 0; influence of contact 1 on contact 0
        // through body 2 should be zero because body 2 has no role in contact 0.
        assert_eq!(influence(&bodies, &contacts, 0, 1, 2), 0.0);
    }
}
